//! Digit templates and the process-wide template catalog
//!
//! A [`DigitTemplate`] is a small binary bitmap showing one way of writing a
//! digit. The catalog holds several variants per class: a thick 7x7
//! canonical form followed by narrower, open, slanted and sloppy variants of
//! assorted sizes. It is built once on first use and never mutated, so it
//! can be read concurrently from any number of recognition or rendering
//! calls.

use crate::binary::BinaryGrid;
use crate::error::Result;
use crate::grid::PixelGrid;
use crate::scores::{Digit, NUM_CLASSES};
use std::sync::LazyLock;

/// One rendering style of a digit class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitTemplate {
    digit: Digit,
    bitmap: BinaryGrid,
}

impl DigitTemplate {
    pub fn new(digit: Digit, bitmap: BinaryGrid) -> Self {
        DigitTemplate { digit, bitmap }
    }

    /// Parse a template from `'#'`/`'.'` rows
    pub fn from_rows(digit: Digit, rows: &[&str]) -> Result<Self> {
        Ok(DigitTemplate {
            digit,
            bitmap: BinaryGrid::from_rows(rows)?,
        })
    }

    #[inline]
    pub fn digit(&self) -> Digit {
        self.digit
    }

    #[inline]
    pub fn bitmap(&self) -> &BinaryGrid {
        &self.bitmap
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.bitmap.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.bitmap.height()
    }

    /// Template as intensities (1.0 for ink, 0.0 for background)
    pub fn to_grid(&self) -> PixelGrid {
        let data = self
            .bitmap
            .cells()
            .iter()
            .map(|&c| if c { 1.0 } else { 0.0 })
            .collect();
        PixelGrid::from_data(self.width(), self.height(), data)
            .unwrap_or_else(|_| unreachable!("template bitmaps are never empty"))
    }
}

/// Read-only set of template variants for every class
#[derive(Debug)]
pub struct TemplateCatalog {
    classes: Vec<Vec<DigitTemplate>>,
}

impl TemplateCatalog {
    /// Build a catalog from per-class row tables
    pub fn from_tables(tables: &[&[&[&str]]; NUM_CLASSES]) -> Result<Self> {
        let mut classes = Vec::with_capacity(NUM_CLASSES);
        for (index, variants) in tables.iter().enumerate() {
            let digit = Digit::from_index(index);
            let parsed = variants
                .iter()
                .map(|rows| DigitTemplate::from_rows(digit, rows))
                .collect::<Result<Vec<_>>>()?;
            classes.push(parsed);
        }
        Ok(TemplateCatalog { classes })
    }

    /// All variants of one class, canonical form first
    pub fn variants(&self, digit: Digit) -> &[DigitTemplate] {
        &self.classes[digit.index()]
    }

    /// The canonical 7x7 form of a class
    pub fn canonical(&self, digit: Digit) -> &DigitTemplate {
        &self.classes[digit.index()][0]
    }

    /// Iterate over every template of every class
    pub fn iter(&self) -> impl Iterator<Item = &DigitTemplate> {
        self.classes.iter().flatten()
    }

    /// Total number of templates
    pub fn len(&self) -> usize {
        self.classes.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

static CATALOG: LazyLock<TemplateCatalog> = LazyLock::new(|| {
    TemplateCatalog::from_tables(&TEMPLATE_TABLES).expect("built-in template tables are valid")
});

/// The built-in template catalog
pub fn catalog() -> &'static TemplateCatalog {
    &CATALOG
}

/// Variants of one class from the built-in catalog
pub fn templates(digit: Digit) -> &'static [DigitTemplate] {
    CATALOG.variants(digit)
}

/// Canonical form of one class from the built-in catalog
pub fn canonical(digit: Digit) -> &'static DigitTemplate {
    CATALOG.canonical(digit)
}

const ZERO: &[&[&str]] = &[
    &[".#####.", "##...##", "##...##", "##...##", "##...##", "##...##", ".#####."],
    &["..###..", ".#...#.", "#.....#", "#.....#", "#.....#", ".#...#.", "..###.."],
    &["..##..", ".#..#.", "#....#", "#....#", "#....#", "#....#", ".#..#.", "..##.."],
    &[".#####.", "#.....#", "#.....#", "#.....#", ".#####."],
    &[".####.", "#....#", "#....#", "#....#", "#....#", "#....#", ".####."],
    &[".##.", "#..#", "#..#", "#..#", ".##."],
    &[".###.", "#...#", "#...#", "#...#", ".###."],
    // lopsided
    &["..##.", ".#..#", "#...#", "#...#", ".#..#", "..##."],
    // open at the top
    &[".###.", "#....", "#...#", "#...#", ".###."],
    // slanted
    &[".##..", "#..#.", "#...#", "#..#.", ".##.."],
    &["..#..", ".#.#.", "#...#", "#...#", ".#.#.", "..#.."],
    // gap on the left
    &[".###.", "#...#", "#....", "#...#", ".###."],
    // boxy
    &["####", "#..#", "#..#", "####"],
    &[".#.#.", "#...#", "#...#", "#...#", ".#.#."],
];

const ONE: &[&[&str]] = &[
    &["..##...", ".###...", "..##...", "..##...", "..##...", "..##...", ".####.."],
    &["...#...", "..##...", ".#.#...", "...#...", "...#...", "...#...", ".#####."],
    &["..#.", ".##.", "..#.", "..#.", "..#.", "..#.", ".###"],
    &["#", "#", "#", "#", "#", "#", "#"],
    &["..#..", ".##..", "..#..", "..#..", "..#..", "..#..", "..#.."],
    &[".#.", ".#.", ".#.", ".#.", ".#.", ".#.", ".#."],
    &["##.", ".#.", ".#.", ".#.", ".#.", ".#.", "###"],
    // steep slant
    &["..#", ".#.", ".#.", ".#.", "#..", "#.."],
    &[".#", ".#", "#.", "#.", "#.", "#."],
    // bowed
    &["#.", ".#", ".#", ".#", ".#", "#."],
    &["##", "##", ".#", ".#", ".#", "##"],
    &[".#.", "##.", ".#.", ".#.", ".##", ".#."],
    // diagonal stroke
    &["...#", "..#.", "..#.", ".#..", ".#..", "#..."],
];

const TWO: &[&[&str]] = &[
    &[".#####.", "##...##", "....##.", "..###..", ".##....", "##.....", "#######"],
    &[".####.", "#....#", ".....#", "....#.", "..##..", ".#....", "######"],
    &[".###.", "#...#", "....#", "...#.", "..#..", ".#...", "#####"],
    &["####.", "....#", "...#.", "..#..", ".#...", "#....", "#####"],
    &[".##.", "#..#", "...#", "..#.", ".#..", "#...", "####"],
    &["###", "..#", ".#.", "#..", "#..", "###"],
    // flat top
    &["###.", "...#", "..#.", ".#..", "#...", "###."],
    &["..##", "....#", "...#.", "..#..", ".#...", "####"],
    // short base
    &[".##.", "...#", "..#.", ".#..", "#...", "##.."],
    &["###", "..#", ".#.", ".#.", "#..", "###"],
    &[".#.", "#.#", "..#", ".#.", "#..", "###"],
    // angular
    &["##..", "..#.", "..#.", ".#..", "#...", "####"],
];

const THREE: &[&[&str]] = &[
    &[".#####.", "##...##", ".....##", "..####.", ".....##", "##...##", ".#####."],
    &[".####.", "#....#", ".....#", "..###.", ".....#", "#....#", ".####."],
    &["####.", "....#", "....#", ".###.", "....#", "....#", "####."],
    &[".###.", "#...#", "....#", "..##.", "....#", "#...#", ".###."],
    &["###.", "...#", "...#", ".##.", "...#", "...#", "###."],
    &["###.", "...#", "###.", "...#", "...#", "###."],
    // rounded
    &["##..", "..#.", "..#.", ".#..", "..#.", "..#.", "##.."],
    &["###", "..#", ".#.", "..#", "..#", "###"],
    &[".##.", "...#", "..#.", "...#", "...#", ".##."],
    // open at the bottom
    &["###.", "...#", ".##.", "...#", "..#.", ".#.."],
    &[".#..", "..#.", ".#..", "..#.", "..#.", ".#.."],
];

const FOUR: &[&[&str]] = &[
    &["...###.", "..####.", ".##.##.", "##..##.", "#######", "....##.", "....##."],
    &["....#.", "...##.", "..#.#.", ".#..#.", "######", "....#.", "....#."],
    &["#...#", "#...#", "#...#", "#####", "....#", "....#", "....#"],
    &["#..#", "#..#", "#..#", "####", "...#", "...#", "...#"],
    &["#...#", "#...#", "#####", "....#", "....#", "....#"],
    &["#.#", "#.#", "###", "..#", "..#"],
    // short
    &["#..#", "#..#", "####", "...#", "...#"],
    &["..#.", ".##.", "#.#.", "####", "..#.", "..#."],
    &["#...#", "#..#.", ".###.", "...#.", "...#."],
    // open top
    &[".#.#", "#..#", "####", "...#", "...#", "..#."],
    &["#..", "#.#", "###", "..#", "..#", "..#"],
];

const FIVE: &[&[&str]] = &[
    &["#######", "##.....", "######.", ".....##", ".....##", "##...##", ".#####."],
    &["######", "#.....", "#.....", ".####.", ".....#", "#....#", ".####."],
    &["#####", "#....", "####.", "....#", "....#", "#...#", ".###."],
    &["#####", "#....", "#....", "####.", "....#", "....#", "####."],
    &["####", "#...", "###.", "...#", "...#", "###."],
    // rounded
    &["####", "#...", "##..", "..#.", "..#.", "##.."],
    // open at the bottom
    &["###.", "#...", "###.", "...#", "..#.", ".#.."],
    &["####", "#...", "#...", "###.", "...#", "###."],
    // no top-left corner
    &[".###", ".#..", ".##.", "...#", "...#", ".##."],
    &["###", "#..", "##.", "..#", "..#", "#.."],
];

const SIX: &[&[&str]] = &[
    &[".#####.", "##.....", "##.....", "######.", "##...##", "##...##", ".#####."],
    &["..###.", ".#....", "#.....", "#####.", "#....#", "#....#", ".####."],
    &[".###.", "#....", "#....", "####.", "#...#", "#...#", ".###."],
    &[".##.", "#...", "#...", "###.", "#..#", "#..#", ".##."],
    &["###.", "#...", "###.", "#..#", "#..#", "###."],
    // curled top
    &["..#.", ".#..", "#...", "###.", "#..#", ".##."],
    // small loop
    &[".##.", "#...", "##..", "#.#.", "#.#.", ".#.."],
    &[".#..", "#...", "###.", "#..#", "#..#", ".##."],
    &["..##", ".#..", "#...", "##..", "#.#.", ".#.."],
    &[".#.", "#..", "#..", "##.", "#.#", ".#."],
];

const SEVEN: &[&[&str]] = &[
    &["#######", ".....##", "....##.", "...##..", "..##...", "..##...", "..##..."],
    &["######", ".....#", "....#.", "...#..", "..#...", "..#...", "..#..."],
    &["#####", "....#", "...#.", "..#..", ".#...", ".#...", ".#..."],
    &["####", "...#", "...#", "..#.", "..#.", ".#..", ".#.."],
    &["###", "..#", "..#", ".#.", ".#.", "#.."],
    // upright stem
    &["####", "...#", "..#.", "..#.", ".#..", ".#.."],
    // strong slant
    &["###.", "..#.", "..#.", ".#..", ".#..", "#..."],
    &["####", "...#", "..#.", ".#..", "#...", "#..."],
    &["##", ".#", ".#", "#.", "#."],
    &["###", "..#", ".#.", ".#.", "#..", "#.."],
    &["####", "..#.", "..#.", "..#.", ".#..", ".#.."],
];

const EIGHT: &[&[&str]] = &[
    &[".#####.", "##...##", "##...##", ".#####.", "##...##", "##...##", ".#####."],
    &[".####.", "#....#", "#....#", ".####.", "#....#", "#....#", ".####."],
    &[".###.", "#...#", "#...#", ".###.", "#...#", "#...#", ".###."],
    &[".##.", "#..#", "#..#", ".##.", "#..#", "#..#", ".##."],
    &["###.", "#..#", "###.", "#..#", "#..#", "###."],
    // pinched waist
    &[".##.", "#..#", ".##.", "#..#", "#..#", ".##."],
    &[".#.", "#.#", ".#.", "#.#", "#.#", ".#."],
    // crossed middle
    &[".###.", "#...#", ".#.#.", "#...#", "#...#", ".###."],
    // open upper loop
    &[".##.", "#..#", "#..#", ".#..", "#..#", ".##."],
    &["##..", "#.#.", ".##.", "#.#.", "#.#.", ".##."],
    &[".#.", "#.#", "#.#", ".#.", "#.#", ".#."],
];

const NINE: &[&[&str]] = &[
    &[".#####.", "##...##", "##...##", ".######", ".....##", "....##.", ".####.."],
    &[".####.", "#....#", "#....#", ".#####", ".....#", "....#.", ".###.."],
    &[".###.", "#...#", "#...#", ".####", "....#", "...#.", ".##.."],
    &[".###.", "#...#", "#...#", ".####", "....#", "....#", "....#"],
    &["####", "#..#", "####", "...#", "...#", "...#"],
    // curved tail
    &[".##.", "#..#", "#..#", ".###", "...#", "..#.", ".#.."],
    &[".##.", "#..#", ".###", "...#", "...#", "..#."],
    &["###.", "#..#", "####", "...#", "..#.", ".#.."],
    &[".#.", "#.#", "#.#", ".##", "..#", "..#"],
    // unjoined loop
    &[".##.", "#..#", ".##.", "..#.", "..#.", ".#.."],
    &["##..", "#.#.", ".##.", "..#.", "..#.", ".#.."],
];

const TEMPLATE_TABLES: [&[&[&str]]; NUM_CLASSES] =
    [ZERO, ONE, TWO, THREE, FOUR, FIVE, SIX, SEVEN, EIGHT, NINE];
