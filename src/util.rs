// vim: set ai et ts=4 sw=4 sts=4:
use std::fmt;
use std::os::unix::io::AsRawFd;
use ansi_term::ANSIString;

pub fn maybe_color(s: &ANSIString, emit_color: bool) -> String {
    match emit_color {
        true  => s.to_string(),
        false => (**s).to_string(), // deref once to get ANSIString, once more to get underlying str
    }
}
pub fn ralign(s: &str, width: usize) -> String {
    let visual_len = s.chars().count();
    if visual_len >= width {
        return String::from(s);
    }
    format!("{}{}", " ".repeat(width-visual_len), s)
}
pub fn ralign_colored(s: &ANSIString, width: usize, emit_color: bool)
    -> String
{
    let visual_len = s.chars().count(); // counted on the underlying str, WITHOUT escape sequences
    if visual_len >= width {
        return maybe_color(s, emit_color);
    }
    format!("{}{}", " ".repeat(width-visual_len), maybe_color(s, emit_color))
}
pub fn lalign_colored(s: &ANSIString, width: usize, emit_color: bool)
    -> String
{
    let visual_len = s.chars().count();
    if visual_len >= width {
        return maybe_color(s, emit_color);
    }
    format!("{}{}", maybe_color(s, emit_color), " ".repeat(width-visual_len))
}

#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum Direction {
    Horizontal,
    Vertical,
}
impl fmt::Display for Direction {
    fn fmt(&self,
           f: &mut fmt::Formatter) -> fmt::Result
    {
        write!(f, "{}", match self {
            Direction::Horizontal => "row",
            Direction::Vertical   => "column",
        })
    }
}

pub fn is_a_tty<T: AsRawFd>(handle: &T) -> bool {
    let fd = handle.as_raw_fd();
    unsafe { libc::isatty(fd) != 0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ansi_term::Colour;

    #[test]
    fn alignment_ignores_escape_sequences() {
        let red = Colour::Red.paint("12");
        assert_eq!(ralign("3", 3), "  3");
        assert_eq!(ralign("toolong", 3), "toolong");
        assert_eq!(ralign_colored(&red, 4, false), "  12");
        assert_eq!(lalign_colored(&red, 4, false), "12  ");
        assert_eq!(ralign_colored(&red, 4, true), format!("  {}", red));
        assert_eq!(maybe_color(&red, false), "12");
    }

    #[test]
    fn direction_names() {
        assert_eq!(Direction::Horizontal.to_string(), "row");
        assert_eq!(Direction::Vertical.to_string(), "column");
    }
}
