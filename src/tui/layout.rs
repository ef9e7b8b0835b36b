/// Responsive breakpoints for the character list and bars.
///
/// Single source of truth for width thresholds.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Breakpoint {
    /// < 60 cols: name and status only
    Compact,
    /// 60-109 cols: adds species
    Normal,
    /// 110+ cols: every column
    Wide,
}

impl Breakpoint {
    pub fn from_width(width: u16) -> Self {
        match width {
            0..=59 => Breakpoint::Compact,
            60..=109 => Breakpoint::Normal,
            _ => Breakpoint::Wide,
        }
    }

    /// Check if at least this breakpoint (inclusive)
    pub fn at_least(&self, min: Breakpoint) -> bool {
        *self >= min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_thresholds() {
        assert_eq!(Breakpoint::from_width(40), Breakpoint::Compact);
        assert_eq!(Breakpoint::from_width(60), Breakpoint::Normal);
        assert_eq!(Breakpoint::from_width(109), Breakpoint::Normal);
        assert_eq!(Breakpoint::from_width(110), Breakpoint::Wide);
        assert!(Breakpoint::Wide.at_least(Breakpoint::Normal));
        assert!(!Breakpoint::Compact.at_least(Breakpoint::Normal));
    }
}
