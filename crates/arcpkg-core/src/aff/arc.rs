//! `arc(start,end,x1,x2,easing,y1,y2,color,fx,skyline)`

use super::Rewrite;
use crate::number::increment_decimal;

const PREFIX: &str = "arc(";
const ARG_COUNT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    /// One or more ASCII digits
    Integer,
    /// One or more ASCII digits or periods
    Decimal,
    /// One or more ASCII letters, digits or underscores
    Word,
}

impl Shape {
    fn accepts(self, c: char) -> bool {
        match self {
            Self::Integer => c.is_ascii_digit(),
            Self::Decimal => c.is_ascii_digit() || c == '.',
            Self::Word => c.is_ascii_alphanumeric() || c == '_',
        }
    }
}

const SHAPES: [Shape; ARG_COUNT] = [
    Shape::Integer,
    Shape::Integer,
    Shape::Decimal,
    Shape::Decimal,
    Shape::Word,
    Shape::Decimal,
    Shape::Decimal,
    Shape::Integer,
    Shape::Word,
    Shape::Word,
];

/// An arc note in its fixed ten-argument form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArcStatement<'a> {
    args: [&'a str; ARG_COUNT],
    len: usize,
}

impl<'a> ArcStatement<'a> {
    /// Parse the arc at the start of `text`, if the shape matches exactly.
    pub fn parse(text: &'a str) -> Option<Self> {
        let mut rest = text.strip_prefix(PREFIX)?;
        let mut args = [""; ARG_COUNT];

        for (i, shape) in SHAPES.iter().enumerate() {
            let end = rest
                .find(|c: char| !shape.accepts(c))
                .unwrap_or(rest.len());
            if end == 0 {
                return None;
            }
            args[i] = &rest[..end];

            let separator = if i + 1 == ARG_COUNT { ')' } else { ',' };
            rest = rest[end..].strip_prefix(separator)?;
        }

        let len = text.len() - rest.len();
        Some(Self { args, len })
    }

    /// Byte length of the statement, through the closing parenthesis
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub fn start(&self) -> &'a str {
        self.args[0]
    }

    pub fn end(&self) -> &'a str {
        self.args[1]
    }

    /// Start and end written identically, which the game cannot play
    pub fn is_degenerate(&self) -> bool {
        self.start() == self.end()
    }

    /// The statement with its end time moved one past the start time
    pub fn repaired(&self) -> String {
        let mut args = self.args.map(str::to_string);
        args[1] = increment_decimal(self.args[1]);
        format!("arc({})", args.join(","))
    }
}

pub(crate) fn match_at(text: &str) -> Option<usize> {
    ArcStatement::parse(text).map(|arc| arc.len())
}

pub(crate) fn rewrite(statement: &str) -> Rewrite {
    match ArcStatement::parse(statement) {
        Some(arc) if arc.is_degenerate() => Rewrite::Replace(arc.repaired()),
        _ => Rewrite::Keep,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_arc() {
        let arc = ArcStatement::parse("arc(1000,2000,0.00,1.00,s,1.00,0.00,0,none,false);").unwrap();
        assert_eq!(arc.start(), "1000");
        assert_eq!(arc.end(), "2000");
        assert_eq!(arc.len(), 49);
        assert!(!arc.is_degenerate());
    }

    #[test]
    fn test_parse_with_arctaps() {
        let text = "arc(10,10,1.0,1.0,s,0.0,0.0,0,b,true)[arctap(10)];";
        let arc = ArcStatement::parse(text).unwrap();
        assert_eq!(&text[..arc.len()], "arc(10,10,1.0,1.0,s,0.0,0.0,0,b,true)");
    }

    #[test]
    fn test_parse_rejects_other_shapes() {
        assert!(ArcStatement::parse("arc(1,2,3)").is_none());
        assert!(ArcStatement::parse("arc(-1,2,0.0,0.0,s,0.0,0.0,0,b,b)").is_none());
        assert!(ArcStatement::parse("arc(1,2,0.0,0.0,si-so,0.0,0.0,0,b,b)").is_none());
        assert!(ArcStatement::parse("arc(1,2,0.0,0.0,s,0.0,0.0,0,b,b,c)").is_none());
    }

    #[test]
    fn test_degenerate_arc_repaired() {
        assert_eq!(
            rewrite("arc(10,10,1.0,1.0,s,0.0,0.0,0,b,b)"),
            Rewrite::Replace("arc(10,11,1.0,1.0,s,0.0,0.0,0,b,b)".to_string())
        );
        assert_eq!(
            rewrite("arc(99,99,0.50,0.50,siso,1.00,1.00,1,none,true)"),
            Rewrite::Replace("arc(99,100,0.50,0.50,siso,1.00,1.00,1,none,true)".to_string())
        );
    }

    #[test]
    fn test_distinct_arc_kept() {
        assert_eq!(rewrite("arc(10,20,1.0,1.0,s,0.0,0.0,0,b,b)"), Rewrite::Keep);
        assert_eq!(rewrite("arc(10,010,1.0,1.0,s,0.0,0.0,0,b,b)"), Rewrite::Keep);
    }
}
