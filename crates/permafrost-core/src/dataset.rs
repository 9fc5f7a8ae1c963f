//! Community dataset: loaded once from CSV, read-only afterwards.

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Serialize;

use crate::community::{Community, CommunityRow};
use crate::error::DatasetError;
use crate::hazard::RiskLevel;

/// Immutable, row-ordered table of assessed communities.
#[derive(Debug, Clone)]
pub struct Dataset {
    communities: Vec<Community>,
    by_name: HashMap<String, usize>,
}

impl Dataset {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DatasetError::Io { path: path.to_path_buf(), source })?;
        let dataset = Self::from_reader(file)?;
        tracing::info!("Loaded {} communities from {}", dataset.len(), path.display());
        Ok(dataset)
    }

    /// Parse CSV with a header row. Columns are matched by name; extra
    /// columns are ignored.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let headers = rdr.headers()?.clone();
        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            // Quoted fields may span lines, so report where the record starts.
            let line = record.position().map_or(0, |p| p.line());
            let row: CommunityRow = record.deserialize(Some(&headers))?;
            let community = row.name().to_string();
            let parsed = Community::try_from(row)
                .map_err(|reason| DatasetError::MalformedRow { line, community, reason })?;
            rows.push(parsed);
        }
        Self::from_communities(rows)
    }

    pub fn from_csv_str(text: &str) -> Result<Self, DatasetError> {
        Self::from_reader(text.as_bytes())
    }

    pub fn from_communities(communities: Vec<Community>) -> Result<Self, DatasetError> {
        if communities.is_empty() {
            return Err(DatasetError::Empty);
        }
        let mut by_name = HashMap::with_capacity(communities.len());
        for (i, c) in communities.iter().enumerate() {
            if by_name.insert(c.name.clone(), i).is_some() {
                return Err(DatasetError::DuplicateCommunity(c.name.clone()));
            }
        }
        Ok(Self { communities, by_name })
    }

    pub fn len(&self) -> usize {
        self.communities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.communities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Community> {
        self.communities.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Community> {
        self.by_name.get(name).map(|&i| &self.communities[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Community names in row order, as offered by the selector.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.communities.iter().map(|c| c.name.as_str())
    }

    /// Check the data-quality invariants that loading does not enforce.
    pub fn audit(&self) -> Vec<AuditFinding> {
        let mut findings = Vec::new();
        for c in &self.communities {
            let mut push = |kind| findings.push(AuditFinding { community: c.name.clone(), kind });

            let sum = c.hazard_sum();
            if sum != c.rating_score {
                push(AuditKind::RatingSumMismatch { rating_score: c.rating_score, hazard_sum: sum });
            }
            match RiskLevel::from_rating_score(c.rating_score) {
                None => push(AuditKind::RatingOutOfDomain { rating_score: c.rating_score }),
                Some(expected) if expected != c.risk_level => {
                    push(AuditKind::RiskLevelMismatch { supplied: c.risk_level, expected })
                }
                Some(_) => {}
            }
            if !(-90.0..=90.0).contains(&c.latitude) || !(-180.0..=180.0).contains(&c.longitude) {
                push(AuditKind::CoordinatesOutOfRange { latitude: c.latitude, longitude: c.longitude });
            }
        }
        findings
    }
}

// ── Audit ────────────────────────────────────────────────────────────────────

/// A data-quality problem found in one community row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditFinding {
    pub community: String,
    pub kind: AuditKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuditKind {
    RatingSumMismatch { rating_score: u32, hazard_sum: u32 },
    RatingOutOfDomain { rating_score: u32 },
    RiskLevelMismatch { supplied: RiskLevel, expected: RiskLevel },
    CoordinatesOutOfRange { latitude: f64, longitude: f64 },
}

impl fmt::Display for AuditFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.community)?;
        match &self.kind {
            AuditKind::RatingSumMismatch { rating_score, hazard_sum } => {
                write!(f, "rating score {rating_score} != hazard sum {hazard_sum}")
            }
            AuditKind::RatingOutOfDomain { rating_score } => {
                write!(f, "rating score {rating_score} is not 0 or within 5..=15")
            }
            AuditKind::RiskLevelMismatch { supplied, expected } => {
                write!(f, "risk level {supplied} but rating score implies {expected}")
            }
            AuditKind::CoordinatesOutOfRange { latitude, longitude } => {
                write!(f, "coordinates ({latitude}, {longitude}) are out of range")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::community::tests::community;

    const HEADER: &str = "Community,Latitude,Longitude,Confidence,\
        Permafrost Occurrence,Permafrost Occurrence Label,\
        Permafrost Temperature,Permafrost Temperature Label,\
        Thaw Susceptibility,Thaw Susceptibility Label,\
        Massive Ice,Massive Ice Label,\
        Existing Problems,Existing Problems Label,\
        Rating Score,Risk Level";

    fn csv(rows: &[&str]) -> String {
        let mut text = HEADER.to_string();
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text
    }

    const NOME: &str = "Nome,64.50,-165.41,**,2,Discontinuous,2,-5 to -2 C,2,0.2-0.7 m,2,Sparse ice wedges,1,Minor problems,9,Medium";

    #[test]
    fn parses_rows_by_column_name() {
        let ds = Dataset::from_csv_str(&csv(&[NOME])).unwrap();
        let nome = ds.get("Nome").unwrap();
        assert_eq!(nome.risk_level, RiskLevel::Medium);
        assert_eq!(nome.existing_problems.label, "Minor problems");
        assert_eq!(nome.rating_score, 9);
    }

    #[test]
    fn column_order_does_not_matter() {
        let text = "Risk Level,Rating Score,Community,Latitude,Longitude,Confidence,\
            Existing Problems,Existing Problems Label,Massive Ice,Massive Ice Label,\
            Thaw Susceptibility,Thaw Susceptibility Label,\
            Permafrost Temperature,Permafrost Temperature Label,\
            Permafrost Occurrence,Permafrost Occurrence Label,Notes\n\
            Low,7,Dillingham,59.04,-158.46,*,1,Minor,1,None,1,Low,3,Warm,1,Isolated,extra";
        let ds = Dataset::from_csv_str(text).unwrap();
        let c = ds.get("Dillingham").unwrap();
        assert_eq!(c.permafrost_temperature.score.get(), 3);
        assert_eq!(c.permafrost_occurrence.label, "Isolated");
    }

    #[test]
    fn hazard_score_outside_enumeration_is_fatal() {
        let bad = NOME.replacen(",2,Sparse", ",4,Sparse", 1);
        let err = Dataset::from_csv_str(&csv(&[&bad])).unwrap_err();
        assert!(matches!(err, DatasetError::MalformedRow { line: 2, .. }), "{err}");
    }

    #[test]
    fn unknown_risk_level_is_fatal() {
        let bad = NOME.replace(",Medium", ",Severe");
        assert!(matches!(
            Dataset::from_csv_str(&csv(&[&bad])),
            Err(DatasetError::MalformedRow { .. })
        ));
    }

    #[test]
    fn non_numeric_cell_is_fatal() {
        let bad = NOME.replace("64.50", "north");
        assert!(matches!(Dataset::from_csv_str(&csv(&[&bad])), Err(DatasetError::Csv(_))));
    }

    #[test]
    fn duplicate_and_empty_datasets_are_rejected() {
        assert!(matches!(
            Dataset::from_csv_str(&csv(&[NOME, NOME])),
            Err(DatasetError::DuplicateCommunity(name)) if name == "Nome"
        ));
        assert!(matches!(Dataset::from_csv_str(&csv(&[])), Err(DatasetError::Empty)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Dataset::from_path("/nonexistent/communities.csv").unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }

    #[test]
    fn audit_reports_inconsistent_rows() {
        let ds = Dataset::from_communities(vec![
            community("Consistent", [2, 2, 2, 2, 1], 9, RiskLevel::Medium),
            community("BadSum", [2, 2, 2, 2, 1], 10, RiskLevel::Medium),
            community("BadLevel", [3, 3, 3, 3, 1], 13, RiskLevel::Medium),
            community("BadDomain", [1, 1, 1, 0, 0], 3, RiskLevel::Low),
            Community { latitude: 95.0, ..community("OffGlobe", [2, 2, 2, 2, 1], 9, RiskLevel::Medium) },
        ])
        .unwrap();

        let findings = ds.audit();
        assert_eq!(findings.len(), 4, "{findings:?}");
        assert_eq!(
            findings[0],
            AuditFinding {
                community: "BadSum".into(),
                kind: AuditKind::RatingSumMismatch { rating_score: 10, hazard_sum: 9 },
            }
        );
        assert_eq!(
            findings[1].kind,
            AuditKind::RiskLevelMismatch { supplied: RiskLevel::Medium, expected: RiskLevel::High }
        );
        assert_eq!(findings[2].kind, AuditKind::RatingOutOfDomain { rating_score: 3 });
        assert_eq!(findings[3].community, "OffGlobe");
        assert_eq!(
            findings[3].kind,
            AuditKind::CoordinatesOutOfRange { latitude: 95.0, longitude: -150.0 }
        );
    }

    #[test]
    fn malformed_row_reports_its_starting_line_after_multiline_field() {
        let first = NOME.replace("Discontinuous", "\"Discontinuous\nzone\"");
        let bad = NOME.replace("Nome", "Bad").replace(",Medium", ",Severe");
        let err = Dataset::from_csv_str(&csv(&[&first, &bad])).unwrap_err();
        assert!(
            matches!(&err, DatasetError::MalformedRow { line: 4, community, .. } if community == "Bad"),
            "{err}"
        );
    }
}
