#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Cursor {
    #[default]
    Default,
    Pointer,
}

impl Cursor {
    /// CSS `cursor` property value.
    #[inline]
    pub fn css(self) -> &'static str {
        match self {
            Cursor::Default => "auto",
            Cursor::Pointer => "pointer",
        }
    }
}
