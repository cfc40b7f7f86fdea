//! Fixed seed templates that can be stamped onto a [`crate::grid::Grid`].

/// A named rectangular template of alive (`#`) and dead (`.`) cells.
///
/// Rows are listed top to bottom; every row has the same length.
#[derive(Debug)]
pub struct Pattern {
    pub name: &'static str,
    rows: &'static [&'static str],
}

pub const GLIDER: Pattern = Pattern {
    name: "Glider",
    rows: &[".#.", "..#", "###"],
};

pub const BLINKER: Pattern = Pattern {
    name: "Blinker",
    rows: &["###"],
};

pub const BLOCK: Pattern = Pattern {
    name: "Block",
    rows: &["##", "##"],
};

pub const BEACON: Pattern = Pattern {
    name: "Beacon",
    rows: &["##..", "##..", "..##", "..##"],
};

/// Stampable patterns, indexed by hotkey digit minus one.
pub const PATTERNS: &[Pattern] = &[GLIDER, BLINKER, BLOCK, BEACON];

impl Pattern {
    /// Looks up the pattern bound to a number key (`1` is the glider).
    pub fn for_digit(digit: u8) -> Option<&'static Pattern> {
        let index = usize::from(digit).checked_sub(1)?;
        PATTERNS.get(index)
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |r| r.len())
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Every template cell as `(dx, dy, alive)`, relative to the top-left corner.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, bool)> + '_ {
        self.rows.iter().enumerate().flat_map(|(dy, row)| {
            row.bytes()
                .enumerate()
                .map(move |(dx, b)| (dx, dy, b == b'#'))
        })
    }
}
