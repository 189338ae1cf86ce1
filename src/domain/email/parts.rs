use mailparse::ParsedMail;

/// Iterates over a parsed email and all its subparts, breadth
/// first.
#[derive(Debug)]
pub struct PartsIterator<'a> {
    pub pos: usize,
    pub parts: Vec<&'a ParsedMail<'a>>,
}

impl<'a> PartsIterator<'a> {
    pub fn new(part: &'a ParsedMail<'a>) -> Self {
        Self {
            pos: 0,
            parts: vec![part],
        }
    }
}

impl<'a> Iterator for PartsIterator<'a> {
    type Item = &'a ParsedMail<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.parts.len() {
            return None;
        }

        for part in &self.parts[self.pos].subparts {
            self.parts.push(part)
        }

        let item = self.parts[self.pos];
        self.pos += 1;
        Some(item)
    }
}
