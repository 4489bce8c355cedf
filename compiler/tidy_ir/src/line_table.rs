//! Offset-to-line mapping whose line numbers can be merged.
//!
//! The printer decides vertical spacing purely from the logical line numbers
//! this table reports: two items one line apart get a newline, two or more
//! lines apart get a blank line. Removing a blank line therefore needs no
//! change to the text or the tree, only a [`LineTable::merge_line`] call that
//! joins the gap into the neighboring line.
//!
//! Physical lines are the lines of the text as written. Each physical line
//! belongs to exactly one logical line; joining a physical boundary puts the
//! lower line into the logical line of the upper one and shifts every later
//! logical number down by one.
//!
//! A merge only ever joins boundaries that touch a blank physical line, so
//! two content lines are never fused, and repeating or reordering merges
//! cannot change the result.

use crate::Span;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineTable {
    /// Byte offset at which each physical line starts; `starts[0] == 0`.
    starts: Vec<u32>,
    /// Whether each physical line holds only spaces, tabs and carriage returns.
    blank: Vec<bool>,
    /// `joined[k]` when physical line `k + 1` shares the logical line of `k`.
    joined: Vec<bool>,
    /// 1-based logical line of each physical line.
    logical: Vec<u32>,
}

impl LineTable {
    /// Build the table for `source` with no merges applied.
    pub fn new(source: &str) -> Self {
        let mut starts = vec![0u32];
        let mut blank = Vec::new();
        let mut current_blank = true;
        for (i, byte) in source.bytes().enumerate() {
            match byte {
                b'\n' => {
                    blank.push(current_blank);
                    current_blank = true;
                    starts.push(u32::try_from(i + 1).unwrap_or(u32::MAX));
                }
                b' ' | b'\t' | b'\r' => {}
                _ => current_blank = false,
            }
        }
        blank.push(current_blank);

        let count = starts.len();
        let logical = (1..=u32::try_from(count).unwrap_or(u32::MAX)).collect();
        LineTable {
            starts,
            blank,
            joined: vec![false; count],
            logical,
        }
    }

    /// Mark the lines covered by a multi-line token or comment as content.
    ///
    /// A raw string or block comment can contain lines that look blank; they
    /// are part of the token and must never be merged away.
    pub fn mark_content(&mut self, span: Span) {
        let first = self.physical_line(span.start);
        let last = self.physical_line(span.end);
        for blank in self.blank.iter_mut().take(last + 1).skip(first) {
            *blank = false;
        }
    }

    /// Number of physical lines; a trailing newline opens one more.
    #[inline]
    pub fn physical_line_count(&self) -> usize {
        self.starts.len()
    }

    /// Highest logical line number.
    #[inline]
    pub fn line_count(&self) -> u32 {
        self.logical.last().copied().unwrap_or(1)
    }

    /// 0-based physical line containing `offset`.
    pub fn physical_line(&self, offset: u32) -> usize {
        self.starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1)
    }

    /// 1-based logical line containing `offset`.
    #[inline]
    pub fn line(&self, offset: u32) -> u32 {
        self.logical[self.physical_line(offset)]
    }

    #[inline]
    pub fn is_blank(&self, physical: usize) -> bool {
        self.blank.get(physical).copied().unwrap_or(false)
    }

    /// 1-based physical line and 1-based character column of `offset`.
    ///
    /// Merges do not affect this; it is what diagnostics report.
    pub fn position(&self, source: &str, offset: u32) -> (u32, u32) {
        let physical = self.physical_line(offset);
        let start = self.starts[physical] as usize;
        let end = (offset as usize).min(source.len());
        let column = source
            .get(start..end)
            .map_or(0, |text| text.chars().count());
        (
            u32::try_from(physical + 1).unwrap_or(u32::MAX),
            u32::try_from(column + 1).unwrap_or(u32::MAX),
        )
    }

    /// Collapse logical line `line` with the line that follows it.
    ///
    /// Every blank physical line between the last content line at or before
    /// `line` and the next content line after it is joined, so the two
    /// content lines end up exactly one logical line apart. Out-of-range
    /// lines, including 0 and the last line, are ignored.
    pub fn merge_line(&mut self, line: u32) {
        if line == 0 || line >= self.line_count() {
            return;
        }
        let Some(last) = self
            .logical
            .partition_point(|&l| l <= line)
            .checked_sub(1)
        else {
            return;
        };

        let lo = (0..=last).rev().find(|&i| !self.blank[i]).unwrap_or(0);
        let hi = (last + 1..self.starts.len())
            .find(|&i| !self.blank[i])
            .unwrap_or(self.starts.len());

        for boundary in lo..hi.saturating_sub(1) {
            self.join(boundary);
        }
    }

    /// Put physical line `boundary + 1` on the logical line of `boundary`.
    fn join(&mut self, boundary: usize) {
        if self.joined[boundary] {
            return;
        }
        self.joined[boundary] = true;
        for line in &mut self.logical[boundary + 1..] {
            *line -= 1;
        }
    }
}
