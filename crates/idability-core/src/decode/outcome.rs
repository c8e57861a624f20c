use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// How a code fared against a table, from the owner's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Matches its owner and nobody else.
    #[serde(rename = "TP")]
    Tp,
    /// Matches its owner and at least one other subject.
    #[serde(rename = "TP+FP")]
    TpFp,
    /// Misses its owner but matches someone else.
    #[serde(rename = "FN+FP")]
    FnFp,
    /// Matches nobody.
    #[serde(rename = "FN")]
    Fn,
    /// No code, or the owner is not in the table.
    #[serde(rename = "NA")]
    Na,
}

impl Category {
    /// Fixed reporting order.
    pub const ALL: [Category; 5] = [
        Category::Tp,
        Category::TpFp,
        Category::FnFp,
        Category::Fn,
        Category::Na,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Tp => "TP",
            Category::TpFp => "TP+FP",
            Category::FnFp => "FN+FP",
            Category::Fn => "FN",
            Category::Na => "NA",
        }
    }

    /// 1-based position in the fixed reporting order.
    pub fn rank(&self) -> usize {
        match self {
            Category::Tp => 1,
            Category::TpFp => 2,
            Category::FnFp => 3,
            Category::Fn => 4,
            Category::Na => 5,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Pick the confusion category of one code.
pub fn categorize(owner_matched: bool, match_count: usize, code_is_null: bool) -> Category {
    if code_is_null {
        return Category::Na;
    }
    match (owner_matched, match_count) {
        (true, 1) => Category::Tp,
        (true, _) => Category::TpFp,
        (false, 0) => Category::Fn,
        (false, _) => Category::FnFp,
    }
}

/// Per-category totals over a whole code set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confusion {
    #[serde(rename = "TP")]
    pub tp: usize,
    #[serde(rename = "TP+FP")]
    pub tp_fp: usize,
    #[serde(rename = "FN+FP")]
    pub fn_fp: usize,
    #[serde(rename = "FN")]
    pub fn_: usize,
    #[serde(rename = "NA")]
    pub na: usize,
}

impl Confusion {
    pub fn add(&mut self, category: Category) {
        *self.slot(category) += 1;
    }

    pub fn get(&self, category: Category) -> usize {
        match category {
            Category::Tp => self.tp,
            Category::TpFp => self.tp_fp,
            Category::FnFp => self.fn_fp,
            Category::Fn => self.fn_,
            Category::Na => self.na,
        }
    }

    pub fn total(&self) -> usize {
        Category::ALL.iter().map(|c| self.get(*c)).sum()
    }

    fn slot(&mut self, category: Category) -> &mut usize {
        match category {
            Category::Tp => &mut self.tp,
            Category::TpFp => &mut self.tp_fp,
            Category::FnFp => &mut self.fn_fp,
            Category::Fn => &mut self.fn_,
            Category::Na => &mut self.na,
        }
    }
}

/// Evaluation of one subject's code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectHits {
    pub category: Category,
    /// Subjects matched by the code, in table column order. `None` when the
    /// subject has no code.
    pub matches: Option<Vec<String>>,
    /// Code features the evaluation table does not know.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unknown_features: Vec<String>,
}

/// Result of applying a code set to a table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    pub confusion: Confusion,
    pub subjects: BTreeMap<String, SubjectHits>,
}

impl Evaluation {
    pub fn category_of(&self, subject: &str) -> Option<Category> {
        self.subjects.get(subject).map(|h| h.category)
    }
}
