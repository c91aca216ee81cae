use std::collections::{BTreeSet, HashSet};
use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::Error;

/// A question block of the questionnaire.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Category {
    pub id: u32,
    pub title: String,
    pub questions: BTreeSet<u32>,
}

/// Source of the categories to score against, in presentation order.
pub trait CategoryProvider {
    fn categories(&self) -> &[Category];
}

impl CategoryProvider for Vec<Category> {
    fn categories(&self) -> &[Category] {
        self
    }
}

impl CategoryProvider for [Category] {
    fn categories(&self) -> &[Category] {
        self
    }
}

/// Categories loaded from a JSON array, keeping their order.
#[derive(Debug, Clone, Default)]
pub struct CategoryCatalog {
    categories: Vec<Category>,
}

impl CategoryCatalog {
    /// Category ids must be unique.
    pub fn new(categories: Vec<Category>) -> Result<Self, Error> {
        let mut ids = HashSet::new();
        for category in &categories {
            if !ids.insert(category.id) {
                return Err(Error::DuplicateCategory(category.id));
            }
        }
        Ok(Self { categories })
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, Error> {
        let categories: Vec<Category> = serde_json::from_reader(reader)?;
        Self::new(categories)
    }

    /// Looks a category up by id.
    pub fn category(&self, id: u32) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }
}

impl CategoryProvider for CategoryCatalog {
    fn categories(&self) -> &[Category] {
        &self.categories
    }
}

/// A submitted answer. Only the question matters for scoring.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub struct Answer {
    pub question_id: u32,
}

impl Answer {
    pub fn new(question_id: u32) -> Self {
        Self { question_id }
    }
}

impl From<Answer> for u32 {
    fn from(answer: Answer) -> Self {
        answer.question_id
    }
}

/// All answers of one respondent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerSet {
    answers: Vec<Answer>,
    question_ids: BTreeSet<u32>,
}

impl AnswerSet {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, Error> {
        let answers: Vec<Answer> = serde_json::from_reader(reader)?;
        Ok(answers.into_iter().collect())
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    /// Distinct questions answered.
    pub fn question_ids(&self) -> &BTreeSet<u32> {
        &self.question_ids
    }

    /// Number of answers as submitted, duplicates included.
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

impl FromIterator<Answer> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = Answer>>(iter: I) -> Self {
        let answers = iter.into_iter().collect::<Vec<Answer>>();
        let question_ids = answers.iter().map(|answer| answer.question_id).collect();
        Self {
            answers,
            question_ids,
        }
    }
}

/// Reads respondents from a header-less CSV.
///
/// Each row is `respondent_id,question_id,question_id,...`; rows may differ
/// in length and empty cells are ignored. A malformed row fails on its own
/// without stopping the rest.
pub fn read_bulk<R: Read>(reader: R) -> impl Iterator<Item = Result<(String, AnswerSet), Error>> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
        .into_records()
        .map(|record| -> Result<(String, AnswerSet), Error> {
            let record = record?;
            let mut fields = record.iter();
            let id = fields.next().unwrap_or_default().to_string();
            let answers = fields
                .filter(|field| !field.is_empty())
                .map(|field| {
                    field
                        .parse::<u32>()
                        .map(Answer::new)
                        .map_err(|_| Error::IllegalQuestion(field.to_string()))
                })
                .collect::<Result<AnswerSet, Error>>()?;
            Ok((id, answers))
        })
}
