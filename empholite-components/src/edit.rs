//! Cursor editing shared by the text inputs
//!
//! The cursor is a byte index that always sits on a char boundary.

/// Editing outcome: the new value, if the keystroke changed it
pub(crate) type Edit = Option<String>;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Cursor(usize);

impl Cursor {
    #[cfg(test)]
    pub(crate) fn at(pos: usize) -> Self {
        Self(pos)
    }

    #[cfg(test)]
    pub(crate) fn get(self) -> usize {
        self.0
    }

    /// Pull the cursor back inside `value` after an external change
    pub(crate) fn clamp(&mut self, value: &str) {
        let mut pos = self.0.min(value.len());
        while !value.is_char_boundary(pos) {
            pos -= 1;
        }
        self.0 = pos;
    }

    pub(crate) fn left(&mut self, value: &str) {
        if let Some((i, _)) = value[..self.0].char_indices().next_back() {
            self.0 = i;
        }
    }

    pub(crate) fn right(&mut self, value: &str) {
        if let Some(c) = value[self.0..].chars().next() {
            self.0 += c.len_utf8();
        }
    }

    pub(crate) fn home(&mut self) {
        self.0 = 0;
    }

    pub(crate) fn end(&mut self, value: &str) {
        self.0 = value.len();
    }

    pub(crate) fn insert(&mut self, value: &str, text: &str) -> Edit {
        let mut next = String::with_capacity(value.len() + text.len());
        next.push_str(&value[..self.0]);
        next.push_str(text);
        next.push_str(&value[self.0..]);
        self.0 += text.len();
        Some(next)
    }

    pub(crate) fn backspace(&mut self, value: &str) -> Edit {
        let (start, _) = value[..self.0].char_indices().next_back()?;
        let next = format!("{}{}", &value[..start], &value[self.0..]);
        self.0 = start;
        Some(next)
    }

    pub(crate) fn delete(&self, value: &str) -> Edit {
        let c = value[self.0..].chars().next()?;
        Some(format!(
            "{}{}",
            &value[..self.0],
            &value[self.0 + c.len_utf8()..]
        ))
    }

    /// Character column of the cursor within its line
    pub(crate) fn column(self, value: &str) -> usize {
        let line_start = value[..self.0].rfind('\n').map_or(0, |i| i + 1);
        value[line_start..self.0].chars().count()
    }

    /// Zero-based line the cursor is on
    pub(crate) fn line(self, value: &str) -> usize {
        value[..self.0].matches('\n').count()
    }

    /// Move to `column` on the line `delta` lines away, clamped to its end
    pub(crate) fn vertical(&mut self, value: &str, delta: isize) {
        let column = self.column(value);
        let target = self.line(value) as isize + delta;
        if target < 0 {
            return;
        }
        let Some(line_start) = line_offset(value, target as usize) else {
            return;
        };
        let line = value[line_start..].split('\n').next().unwrap_or_default();
        let offset: usize = line.chars().take(column).map(char::len_utf8).sum();
        self.0 = line_start + offset;
    }
}

/// Byte offset of the start of line `n`
fn line_offset(value: &str, n: usize) -> Option<usize> {
    if n == 0 {
        return Some(0);
    }
    value
        .match_indices('\n')
        .nth(n - 1)
        .map(|(i, _)| i + 1)
}
