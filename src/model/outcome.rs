use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phenotype {
    #[serde(rename = "POS")]
    Positive,
    #[serde(rename = "NEG")]
    Negative,
}

impl Phenotype {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "POS" => Some(Phenotype::Positive),
            "NEG" => Some(Phenotype::Negative),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    TruePositive,
    TrueNegative,
    FalsePositive,
    FalseNegative,
}

impl Outcome {
    pub fn classify(detected: bool, phenotype: Phenotype) -> Self {
        match (detected, phenotype) {
            (true, Phenotype::Positive) => Outcome::TruePositive,
            (false, Phenotype::Negative) => Outcome::TrueNegative,
            (true, Phenotype::Negative) => Outcome::FalsePositive,
            (false, Phenotype::Positive) => Outcome::FalseNegative,
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Outcome::TruePositive => "TP",
            Outcome::TrueNegative => "TN",
            Outcome::FalsePositive => "FP",
            Outcome::FalseNegative => "FN",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConfusionCounts {
    pub tp: u32,
    pub tn: u32,
    pub fp: u32,
    #[serde(rename = "fn")]
    pub fn_: u32,
}

impl ConfusionCounts {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::TruePositive => self.tp += 1,
            Outcome::TrueNegative => self.tn += 1,
            Outcome::FalsePositive => self.fp += 1,
            Outcome::FalseNegative => self.fn_ += 1,
        }
    }

    pub fn positives(&self) -> u32 {
        self.tp + self.fn_
    }

    pub fn negatives(&self) -> u32 {
        self.tn + self.fp
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/outcome.rs"]
mod tests;
