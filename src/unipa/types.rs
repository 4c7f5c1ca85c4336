//! Query parameter types for the catalog search.

use std::fmt;
use std::str::FromStr;

/// A validated search year.
///
/// Accepts a plain 4-digit year (`"2023"`) or the academic-year range
/// notation (`"2023/2024"`), in which case the starting year is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anno(u32);

impl Anno {
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Anno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid search year: {0:?}")]
pub struct ParseAnnoError(String);

impl FromStr for Anno {
    type Err = ParseAnnoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        let year_str = match trimmed.split_once('/') {
            // "YYYY/YYYY": the starting year carries the meaning.
            Some((start, end)) if is_four_digits(start) && is_four_digits(end) => start,
            Some(_) => return Err(ParseAnnoError(s.to_string())),
            None if is_four_digits(trimmed) => trimmed,
            None => return Err(ParseAnnoError(s.to_string())),
        };

        year_str
            .parse()
            .map(Anno)
            .map_err(|_| ParseAnnoError(s.to_string()))
    }
}

fn is_four_digits(s: &str) -> bool {
    s.len() == 4 && s.chars().all(|c| c.is_ascii_digit())
}

/// Degree classes offered by the upstream catalog's `tipoCorso` filter.
///
/// The search currently submits only the unfiltered default; the full table
/// is kept for future filtering support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseType {
    All,
    Laurea,
    LaureaMagistrale,
    LaureaMagistraleCicloUnico,
    LaureaSpecialistica,
    LaureaSpecialisticaCicloUnico,
}

impl CourseType {
    /// The code submitted in the `idTipoCorso` form field.
    pub fn code(self) -> &'static str {
        match self {
            Self::All => "",
            Self::Laurea => "L",
            Self::LaureaMagistrale => "LM",
            Self::LaureaMagistraleCicloUnico => "LMU",
            Self::LaureaSpecialistica => "LS",
            Self::LaureaSpecialisticaCicloUnico => "LSU",
        }
    }

    /// Italian label as rendered by the upstream form.
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "Tutti",
            Self::Laurea => "Laurea",
            Self::LaureaMagistrale => "Laurea magistrale",
            Self::LaureaMagistraleCicloUnico => "Laurea magistrale a ciclo unico",
            Self::LaureaSpecialistica => "Laurea specialistica",
            Self::LaureaSpecialisticaCicloUnico => "Laurea specialistica a ciclo unico",
        }
    }
}
