use crate::config::Config;
use crate::discretize::StateMatrix;
use crate::encode::prioritize::RankContext;
use crate::encode::Encoding;
use crate::error::IdabilityError;
use crate::model::{Code, CodeSet, Table};
use crate::trace::{BuildOutcome, BuildTrace, TraceStep, TraceStepType};
use rust_decimal::Decimal;
use std::collections::VecDeque;
use tracing::{debug, info};

/// Where a single subject's code construction currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Taking features until no other subject shares the whole code.
    Selecting,
    /// Unique already; lengthening up to the minimum code size.
    Padding,
    /// Dropping features the rest of the code makes unnecessary.
    Pruning,
    Done,
    /// Candidates ran out before the subject could be singled out.
    Null,
}

/// Build a code for every subject of `table`.
pub fn build_codes(table: &Table, config: &Config) -> Result<Encoding, IdabilityError> {
    config.validate()?;

    let states = StateMatrix::new(table, &config.discretizer);
    let ctx = RankContext {
        table,
        states: &states,
        discretizer: &config.discretizer,
    };
    let prioritizer = config.ranking.prioritizer();

    info!(
        subjects = table.subjects().len(),
        features = table.features().len(),
        ranking = prioritizer.name(),
        min_code_size = config.min_code_size,
        "building codes"
    );

    let mut codes = CodeSet::new();
    let mut traces = Vec::with_capacity(table.subjects().len());
    for (subject, subject_id) in table.subjects().iter().enumerate() {
        let candidates = prioritizer.order(&ctx, subject);
        let (code, trace) = CodeBuilder::new(table, &states, subject, candidates, config).run();
        debug!(
            subject = %subject_id,
            outcome = ?trace.outcome,
            length = code.as_ref().map(Code::len).unwrap_or(0),
            "built code"
        );
        codes.insert(subject_id.clone(), code);
        traces.push(trace);
    }

    Ok(Encoding { codes, traces })
}

struct CodeBuilder<'a> {
    table: &'a Table,
    states: &'a StateMatrix,
    subject: usize,
    min_code_size: usize,
    similarity_cutoff: Option<Decimal>,
    candidate_count: usize,
    candidates: VecDeque<usize>,
    /// Other subjects not yet told apart from `subject`.
    remaining: Vec<usize>,
    code: Vec<usize>,
    steps: Vec<TraceStep>,
}

impl<'a> CodeBuilder<'a> {
    fn new(
        table: &'a Table,
        states: &'a StateMatrix,
        subject: usize,
        candidates: Vec<usize>,
        config: &Config,
    ) -> Self {
        let remaining = (0..table.subjects().len())
            .filter(|&s| s != subject)
            .collect();
        CodeBuilder {
            table,
            states,
            subject,
            min_code_size: config.min_code_size,
            similarity_cutoff: config.similarity_cutoff,
            candidate_count: candidates.len(),
            candidates: candidates.into(),
            remaining,
            code: Vec::new(),
            steps: Vec::new(),
        }
    }

    fn run(mut self) -> (Option<Code>, BuildTrace) {
        let mut phase = Phase::Selecting;
        while !matches!(phase, Phase::Done | Phase::Null) {
            phase = match phase {
                Phase::Selecting => self.select(),
                Phase::Padding => self.pad(),
                Phase::Pruning => self.prune(),
                Phase::Done | Phase::Null => phase,
            };
        }

        let outcome = match phase {
            Phase::Null => BuildOutcome::Null,
            _ if self.code.len() < self.min_code_size => BuildOutcome::Short,
            _ => BuildOutcome::Unique,
        };
        let code = match outcome {
            BuildOutcome::Null => None,
            _ => {
                let features = self.code.iter().map(|&f| self.feature_id(f)).collect();
                // Candidates come from a ranking of distinct rows.
                Some(Code::from_distinct(features))
            }
        };
        let trace = BuildTrace {
            subject: self.table.subjects()[self.subject].clone(),
            candidates: self.candidate_count,
            outcome,
            steps: self.steps,
        };
        (code, trace)
    }

    fn select(&mut self) -> Phase {
        if self.remaining.is_empty() {
            return if self.code.len() >= self.min_code_size {
                Phase::Pruning
            } else {
                Phase::Padding
            };
        }

        let Some(feature) = self.candidates.pop_front() else {
            return Phase::Null;
        };

        let before = self.remaining.len();
        let states = self.states;
        // Ambiguous readings never rule a subject out.
        self.remaining.retain(|&other| !states.is_absent(feature, other));

        if self.remaining.len() == before {
            self.record(TraceStepType::Skipped, feature);
        } else {
            self.code.push(feature);
            self.record(TraceStepType::Selected, feature);
        }
        // Every feature tried, kept or not, knocks out its look-alikes.
        self.knock_out(feature);
        Phase::Selecting
    }

    fn pad(&mut self) -> Phase {
        if self.code.len() >= self.min_code_size {
            return Phase::Pruning;
        }
        match self.candidates.pop_front() {
            Some(feature) => {
                self.code.push(feature);
                self.record(TraceStepType::Padded, feature);
                self.knock_out(feature);
                Phase::Padding
            }
            None => Phase::Pruning,
        }
    }

    fn prune(&mut self) -> Phase {
        let mut i = self.code.len();
        while i > 0 && self.code.len() > self.min_code_size {
            i -= 1;
            let feature = self.code.remove(i);
            if self.unresolved(&self.code) == 0 {
                self.record(TraceStepType::Pruned, feature);
            } else {
                self.code.insert(i, feature);
            }
        }

        if self.code.is_empty() {
            Phase::Null
        } else {
            Phase::Done
        }
    }

    /// Number of other subjects that no feature of `code` rules out.
    fn unresolved(&self, code: &[usize]) -> usize {
        (0..self.table.subjects().len())
            .filter(|&other| other != self.subject)
            .filter(|&other| code.iter().all(|&f| !self.states.is_absent(f, other)))
            .count()
    }

    fn knock_out(&mut self, taken: usize) {
        let Some(cutoff) = self.similarity_cutoff else {
            return;
        };
        let states = self.states;
        let taken_carriers = states.carriers(taken);
        let mut knocked = Vec::new();
        self.candidates.retain(|&candidate| {
            let keep = jaccard(&taken_carriers, &states.carriers(candidate)) < cutoff;
            if !keep {
                knocked.push(candidate);
            }
            keep
        });
        for feature in knocked {
            self.record(TraceStepType::KnockedOut, feature);
        }
    }

    fn record(&mut self, step_type: TraceStepType, feature: usize) {
        let step = TraceStep {
            step_type,
            feature: self.feature_id(feature),
            remaining: self.remaining.len(),
        };
        self.steps.push(step);
    }

    fn feature_id(&self, feature: usize) -> String {
        self.table.features()[feature].clone()
    }
}

/// Jaccard similarity of two ascending index lists.
pub fn jaccard(a: &[usize], b: &[usize]) -> Decimal {
    let (mut i, mut j, mut shared) = (0, 0, 0usize);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                shared += 1;
                i += 1;
                j += 1;
            }
        }
    }
    let union = a.len() + b.len() - shared;
    if union == 0 {
        return Decimal::ZERO;
    }
    Decimal::from(shared) / Decimal::from(union)
}
