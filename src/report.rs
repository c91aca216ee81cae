use std::io::Write;

use crate::engine::Diagnosis;
use crate::Error;

/// A titled table of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub title: String,
    pub rows: Vec<Vec<String>>,
}

/// Tabular rendition of a diagnosis, one page per table.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub title: String,
    pub pages: Vec<Page>,
}

impl Report {
    pub fn from_diagnosis(title: &str, diagnosis: &Diagnosis) -> Self {
        let mut categories = vec![[
            "id",
            "title",
            "reactions",
            "stress factor",
            "effective reactions",
            "f",
            "dSf, %",
            "answers",
        ]
        .iter()
        .map(|cell| cell.to_string())
        .collect::<Vec<String>>()];
        categories.extend(diagnosis.categories.iter().map(|category| {
            let stat = &category.stat;
            vec![
                category.id.to_string(),
                category.title.clone(),
                stat.reaction_count.to_string(),
                stat.stress_factor.to_string(),
                stat.effective_reaction_count.to_string(),
                stat.f.to_string(),
                stat.d_sf.to_string(),
                stat.answers
                    .iter()
                    .map(|id| id.to_string())
                    .collect::<Vec<String>>()
                    .join(" "),
            ]
        }));

        let summary = &diagnosis.summary;
        let summary = vec![
            vec!["summary ratio".to_string(), summary.summary_ratio.to_string()],
            vec![
                "total reactions".to_string(),
                summary.total_reaction_count.to_string(),
            ],
            vec!["general ratio".to_string(), summary.general_ratio.to_string()],
            vec!["severity".to_string(), diagnosis.description.to_string()],
        ];

        Self {
            title: title.to_string(),
            pages: vec![
                Page {
                    title: "categories".to_string(),
                    rows: categories,
                },
                Page {
                    title: "summary".to_string(),
                    rows: summary,
                },
            ],
        }
    }

    /// Writes every page as its title row followed by its rows.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), Error> {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);
        for page in &self.pages {
            writer.write_record([&page.title])?;
            for row in &page.rows {
                writer.write_record(row)?;
            }
        }
        writer.flush()?;
        tracing::debug!("wrote report {:?} with {} pages", self.title, self.pages.len());
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::catalog::{Answer, AnswerSet, Category};
    use crate::engine::Diagnostics;
    use crate::table::ReactionTable;

    fn diagnosis() -> Diagnosis {
        let categories = vec![Category {
            id: 1,
            title: "first".to_string(),
            questions: [10, 11].into_iter().collect(),
        }];
        let answers = [10, 11].into_iter().map(Answer::new).collect::<AnswerSet>();
        let table = ReactionTable::new(vec![]).unwrap();
        Diagnostics::new(&answers, &table).evaluate(&categories)
    }

    #[test]
    fn test_from_diagnosis() {
        let report = Report::from_diagnosis("respondent", &diagnosis());
        assert_eq!(report.title, "respondent");
        assert_eq!(report.pages.len(), 2);
        assert_eq!(report.pages[0].rows.len(), 2);
        assert_eq!(
            report.pages[0].rows[1],
            vec!["1", "first", "2", "1", "0", "2", "100", "10 11"]
        );
        assert_eq!(report.pages[1].rows[2], vec!["general ratio", "2"]);
    }

    #[test]
    fn test_write_csv() {
        let report = Report::from_diagnosis("respondent", &diagnosis());
        let mut buffer = Vec::new();
        report.write_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines = text.lines().collect::<Vec<&str>>();
        assert_eq!(lines[0], "categories");
        assert_eq!(lines[2], "1,first,2,1,0,2,100,10 11");
        assert_eq!(lines[3], "summary");
        assert_eq!(lines[4], "summary ratio,1");
        assert_eq!(lines.len(), 8);
    }
}
