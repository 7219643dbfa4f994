//! Phospho-peptide notation
//!
//! A peptide is written with one-letter amino-acid codes in upper case. A
//! lowercase `p` marks the residue that follows it as a modification site,
//! e.g. `RRLpSISTESK` carries one site on the serine at position 4.

use mediator::Request;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Example shown by the peptide form's "Example" button
pub const EXAMPLE_PEPTIDE: &str = "RRLpSISTESK";

const RESIDUES: &str = "ACDEFGHIKLMNPQRSTVWY";
const SITE_MARKER: char = 'p';

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsePeptideQuery {
    #[serde(default)]
    pub sequence: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeptideSite {
    /// 1-based position in the bare sequence
    pub position: usize,
    pub residue: char,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhosphoPeptide {
    /// Sequence with the site markers removed
    pub sequence: String,
    pub sites: Vec<PeptideSite>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PeptideParseError {
    #[error("Peptide sequence is required")]
    Empty,

    #[error("Unknown residue '{residue}' at position {position}")]
    UnknownResidue { residue: char, position: usize },

    #[error("Site marker 'p' at the end of the sequence has no residue")]
    DanglingMarker,

    #[error("Site marker 'p' at position {position} is repeated")]
    DoubleMarker { position: usize },

    #[error("Peptide has no modification site; mark one with 'p' (e.g. RRLpSISTESK)")]
    NoSites,
}

impl Request<Result<PhosphoPeptide, PeptideParseError>> for ParsePeptideQuery {}

impl PhosphoPeptide {
    /// Parse marked peptide notation. Surrounding whitespace is ignored;
    /// positions in errors are 1-based offsets into the trimmed input.
    pub fn parse(text: &str) -> Result<Self, PeptideParseError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(PeptideParseError::Empty);
        }

        let mut sequence = String::with_capacity(text.len());
        let mut sites = Vec::new();
        let mut marked = false;

        for (offset, c) in text.chars().enumerate() {
            let position = offset + 1;
            if c == SITE_MARKER {
                if marked {
                    return Err(PeptideParseError::DoubleMarker { position });
                }
                marked = true;
                continue;
            }

            if !RESIDUES.contains(c) {
                return Err(PeptideParseError::UnknownResidue {
                    residue: c,
                    position,
                });
            }

            sequence.push(c);
            if marked {
                sites.push(PeptideSite {
                    position: sequence.len(),
                    residue: c,
                });
                marked = false;
            }
        }

        if marked {
            return Err(PeptideParseError::DanglingMarker);
        }
        if sites.is_empty() {
            return Err(PeptideParseError::NoSites);
        }

        Ok(Self { sequence, sites })
    }
}

#[tracing::instrument(fields(sequence = %query.sequence))]
pub fn handle(query: ParsePeptideQuery) -> Result<PhosphoPeptide, PeptideParseError> {
    let peptide = PhosphoPeptide::parse(&query.sequence)?;
    tracing::debug!(length = peptide.sequence.len(), sites = peptide.sites.len(), "Parsed peptide");
    Ok(peptide)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_peptide() {
        let peptide = PhosphoPeptide::parse(EXAMPLE_PEPTIDE).unwrap();
        assert_eq!(peptide.sequence, "RRLSISTESK");
        assert_eq!(
            peptide.sites,
            vec![PeptideSite {
                position: 4,
                residue: 'S'
            }]
        );
    }

    #[test]
    fn test_multiple_sites_and_whitespace() {
        let peptide = PhosphoPeptide::parse("  pSAApTPpY\n").unwrap();
        assert_eq!(peptide.sequence, "SAATPY");
        let positions: Vec<_> = peptide.sites.iter().map(|s| (s.position, s.residue)).collect();
        assert_eq!(positions, vec![(1, 'S'), (4, 'T'), (6, 'Y')]);
    }

    #[test]
    fn test_proline_is_a_residue_not_a_marker() {
        let peptide = PhosphoPeptide::parse("PPpSP").unwrap();
        assert_eq!(peptide.sequence, "PPSP");
        assert_eq!(peptide.sites[0].position, 3);
    }

    #[test]
    fn test_errors() {
        assert_eq!(PhosphoPeptide::parse("   "), Err(PeptideParseError::Empty));
        assert_eq!(
            PhosphoPeptide::parse("RRLpSXK"),
            Err(PeptideParseError::UnknownResidue {
                residue: 'X',
                position: 6
            })
        );
        assert_eq!(
            PhosphoPeptide::parse("rrlpS"),
            Err(PeptideParseError::UnknownResidue {
                residue: 'r',
                position: 1
            })
        );
        assert_eq!(PhosphoPeptide::parse("RRLSp"), Err(PeptideParseError::DanglingMarker));
        assert_eq!(
            PhosphoPeptide::parse("RRppS"),
            Err(PeptideParseError::DoubleMarker { position: 4 })
        );
        assert_eq!(PhosphoPeptide::parse("RRLSIS"), Err(PeptideParseError::NoSites));
    }

    #[test]
    fn test_handle() {
        let query = ParsePeptideQuery {
            sequence: EXAMPLE_PEPTIDE.to_string(),
        };
        assert_eq!(handle(query).unwrap().sites.len(), 1);
    }
}
