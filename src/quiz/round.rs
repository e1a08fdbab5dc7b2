//! Round engine.
//!
//! Owns the state of a single quiz round: which countries were drawn, what
//! the user answered, and the running score. The UI reads results through
//! shared references and changes them only through the engine's methods.

use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;
use tracing::{debug, info};

use super::catalog::CountryRecord;
use super::normalize::normalize;

/// Errors returned by the round engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoundError {
    #[error("Cannot draw {requested} questions from a catalog of {available} countries")]
    InsufficientCatalog { requested: usize, available: usize },
    #[error("No round has been started")]
    NotStarted,
    #[error("The round is already finished")]
    RoundFinished,
    #[error("The round is still in progress")]
    RoundInProgress,
}

/// Outcome of one question in a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionResult {
    code: String,
    flag: String,
    display_name: String,
    accepted: BTreeSet<String>,
    user_answer: Option<String>,
    correct: bool,
    skipped: bool,
}

impl QuestionResult {
    fn from_record(record: &CountryRecord) -> Self {
        Self {
            code: record.code().to_string(),
            flag: record.flag().to_string(),
            display_name: record.display_name().to_string(),
            accepted: record.names().iter().map(|n| normalize(n)).collect(),
            user_answer: None,
            correct: false,
            skipped: false,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn flag(&self) -> &str {
        &self.flag
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Raw text the user submitted, verbatim.
    pub fn user_answer(&self) -> Option<&str> {
        self.user_answer.as_deref()
    }

    pub fn is_correct(&self) -> bool {
        self.correct
    }

    /// Set by `mark_unknown`, cleared by a later `submit_answer`.
    pub fn is_skipped(&self) -> bool {
        self.skipped
    }
}

/// "Question N of M" data for the progress label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// 1-based number of the current question.
    pub number: usize,
    pub total: usize,
}

/// One row of the end-of-round summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryEntry {
    pub flag: String,
    pub name: String,
    /// `None` when the user gave no usable answer.
    pub answer: Option<String>,
}

impl SummaryEntry {
    fn from_result(result: &QuestionResult) -> Self {
        Self {
            flag: result.flag.clone(),
            name: result.display_name.clone(),
            answer: result
                .user_answer
                .as_ref()
                .filter(|a| !a.trim().is_empty())
                .cloned(),
        }
    }
}

/// Final score plus the two partitioned result lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSummary {
    pub score: usize,
    pub total: usize,
    pub correct: Vec<SummaryEntry>,
    pub incorrect: Vec<SummaryEntry>,
}

#[derive(Debug, Clone)]
struct RoundState {
    questions: Vec<QuestionResult>,
    index: usize,
    score: usize,
}

impl RoundState {
    fn total(&self) -> usize {
        self.questions.len()
    }

    fn is_finished(&self) -> bool {
        self.index >= self.total()
    }
}

/// Drives a round: `NotStarted -> InProgress(index) -> Finished`.
#[derive(Debug, Clone, Default)]
pub struct RoundEngine {
    round: Option<RoundState>,
}

impl RoundEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new round of `total` questions drawn without replacement.
    ///
    /// On error the previous round, if any, is left as it was.
    pub fn start_round<R: Rng + ?Sized>(
        &mut self,
        catalog: &[CountryRecord],
        total: usize,
        rng: &mut R,
    ) -> Result<(), RoundError> {
        if total == 0 || total > catalog.len() {
            return Err(RoundError::InsufficientCatalog {
                requested: total,
                available: catalog.len(),
            });
        }

        // Full Fisher-Yates shuffle so that even total == catalog.len()
        // yields a random order.
        let mut order: Vec<&CountryRecord> = catalog.iter().collect();
        order.shuffle(rng);

        let questions: Vec<QuestionResult> = order
            .into_iter()
            .take(total)
            .map(QuestionResult::from_record)
            .collect();

        debug!(
            codes = ?questions.iter().map(|q| q.code.as_str()).collect::<Vec<_>>(),
            "Round pool drawn"
        );
        info!(total, catalog = catalog.len(), "Round started");

        self.round = Some(RoundState {
            questions,
            index: 0,
            score: 0,
        });
        Ok(())
    }

    fn round(&self) -> Result<&RoundState, RoundError> {
        self.round.as_ref().ok_or(RoundError::NotStarted)
    }

    fn active_round(&mut self) -> Result<&mut RoundState, RoundError> {
        let round = self.round.as_mut().ok_or(RoundError::NotStarted)?;
        if round.is_finished() {
            return Err(RoundError::RoundFinished);
        }
        Ok(round)
    }

    fn finished_round(&self) -> Result<&RoundState, RoundError> {
        let round = self.round()?;
        if !round.is_finished() {
            return Err(RoundError::RoundInProgress);
        }
        Ok(round)
    }

    pub fn is_started(&self) -> bool {
        self.round.is_some()
    }

    pub fn is_finished(&self) -> bool {
        self.round.as_ref().is_some_and(RoundState::is_finished)
    }

    pub fn current_question(&self) -> Result<&QuestionResult, RoundError> {
        let round = self.round()?;
        round
            .questions
            .get(round.index)
            .ok_or(RoundError::RoundFinished)
    }

    /// Record `raw` as the answer to the current question and score it.
    ///
    /// Submitting again on the same question replaces the previous outcome.
    pub fn submit_answer(&mut self, raw: &str) -> Result<bool, RoundError> {
        let round = self.active_round()?;
        let guess = normalize(raw);
        let question = &round.questions[round.index];
        let correct = question.accepted.contains(&guess);
        record(round, raw.to_string(), correct, false);
        debug!(
            code = %round.questions[round.index].code,
            correct,
            score = round.score,
            "Answer scored"
        );
        Ok(correct)
    }

    /// Give up on the current question, storing `placeholder` as the answer.
    pub fn mark_unknown(&mut self, placeholder: &str) -> Result<(), RoundError> {
        let round = self.active_round()?;
        record(round, placeholder.to_string(), false, true);
        debug!(code = %round.questions[round.index].code, "Question skipped");
        Ok(())
    }

    /// Move to the next question.
    pub fn advance(&mut self) -> Result<(), RoundError> {
        let round = self.active_round()?;
        round.index += 1;
        if round.is_finished() {
            info!(score = round.score, total = round.total(), "Round finished");
        }
        Ok(())
    }

    pub fn score(&self) -> usize {
        self.round.as_ref().map_or(0, |r| r.score)
    }

    pub fn total(&self) -> usize {
        self.round.as_ref().map_or(0, RoundState::total)
    }

    /// Progress label data; `None` once the round is over.
    pub fn progress(&self) -> Option<Progress> {
        let round = self.round.as_ref()?;
        (!round.is_finished()).then(|| Progress {
            number: round.index + 1,
            total: round.total(),
        })
    }

    /// Whether the current question is the round's last one.
    pub fn is_last_question(&self) -> bool {
        self.round
            .as_ref()
            .is_some_and(|r| !r.is_finished() && r.index + 1 == r.total())
    }

    /// All results in round order.
    pub fn results(&self) -> &[QuestionResult] {
        self.round
            .as_ref()
            .map(|r| r.questions.as_slice())
            .unwrap_or(&[])
    }

    pub fn correct_results(&self) -> Result<Vec<&QuestionResult>, RoundError> {
        let round = self.finished_round()?;
        Ok(round.questions.iter().filter(|q| q.correct).collect())
    }

    pub fn incorrect_results(&self) -> Result<Vec<&QuestionResult>, RoundError> {
        let round = self.finished_round()?;
        Ok(round.questions.iter().filter(|q| !q.correct).collect())
    }

    pub fn summary(&self) -> Result<RoundSummary, RoundError> {
        let correct = self.correct_results()?;
        let incorrect = self.incorrect_results()?;
        Ok(RoundSummary {
            score: self.score(),
            total: self.total(),
            correct: correct.into_iter().map(SummaryEntry::from_result).collect(),
            incorrect: incorrect.into_iter().map(SummaryEntry::from_result).collect(),
        })
    }
}

/// Store an outcome on the current question, keeping score consistent with
/// the correctness flags.
fn record(round: &mut RoundState, answer: String, correct: bool, skipped: bool) {
    let question = &mut round.questions[round.index];
    if question.correct {
        round.score -= 1;
    }
    question.user_answer = Some(answer);
    question.correct = correct;
    question.skipped = skipped;
    if correct {
        round.score += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::{HashMap, HashSet};

    fn country(code: &str, flag: &str, names: &[&str]) -> CountryRecord {
        CountryRecord::new(code, flag, names.iter().map(|n| n.to_string()).collect())
    }

    fn three() -> Vec<CountryRecord> {
        vec![
            country("PL", "🇵🇱", &["Polska"]),
            country("DE", "🇩🇪", &["Niemcy"]),
            country("FR", "🇫🇷", &["Francja"]),
        ]
    }

    fn twelve() -> Vec<CountryRecord> {
        (0..12)
            .map(|i| country(&format!("C{i}"), "🏳", &[&format!("Kraj {i}")]))
            .collect()
    }

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn starts_with_distinct_questions() {
        let catalog = twelve();
        for seed in 0..50 {
            let mut engine = RoundEngine::new();
            engine.start_round(&catalog, 10, &mut rng(seed)).unwrap();
            let codes: HashSet<&str> = engine.results().iter().map(|q| q.code()).collect();
            assert_eq!(engine.results().len(), 10);
            assert_eq!(codes.len(), 10);
            assert_eq!(engine.score(), 0);
            assert_eq!(engine.progress(), Some(Progress { number: 1, total: 10 }));
        }
    }

    #[test]
    fn rejects_rounds_larger_than_catalog() {
        let mut engine = RoundEngine::new();
        assert_eq!(
            engine.start_round(&three(), 4, &mut rng(1)),
            Err(RoundError::InsufficientCatalog {
                requested: 4,
                available: 3
            })
        );
        assert!(!engine.is_started());
        assert!(matches!(
            engine.start_round(&three(), 0, &mut rng(1)),
            Err(RoundError::InsufficientCatalog { requested: 0, .. })
        ));
    }

    #[test]
    fn failed_start_keeps_previous_round() {
        let mut engine = RoundEngine::new();
        engine.start_round(&three(), 3, &mut rng(7)).unwrap();
        let answer = engine.current_question().unwrap().display_name().to_string();
        engine.submit_answer(&answer).unwrap();
        engine.advance().unwrap();
        let before: Vec<QuestionResult> = engine.results().to_vec();

        assert!(engine.start_round(&three(), 10, &mut rng(8)).is_err());
        assert_eq!(engine.results(), before.as_slice());
        assert_eq!(engine.score(), 1);
        assert_eq!(engine.progress(), Some(Progress { number: 2, total: 3 }));
    }

    #[test]
    fn same_seed_gives_same_order() {
        let catalog = twelve();
        let mut a = RoundEngine::new();
        let mut b = RoundEngine::new();
        a.start_round(&catalog, 12, &mut rng(42)).unwrap();
        b.start_round(&catalog, 12, &mut rng(42)).unwrap();
        assert_eq!(a.results(), b.results());
    }

    #[test]
    fn full_size_round_is_shuffled() {
        let catalog = twelve();
        let catalog_order: Vec<&str> = catalog.iter().map(|c| c.code()).collect();
        let shuffled = (0..20).any(|seed| {
            let mut engine = RoundEngine::new();
            engine.start_round(&catalog, 12, &mut rng(seed)).unwrap();
            let order: Vec<&str> = engine.results().iter().map(|q| q.code()).collect();
            order != catalog_order
        });
        assert!(shuffled);
    }

    #[test]
    fn permutations_are_roughly_uniform() {
        let catalog = three();
        let mut counts: HashMap<Vec<String>, usize> = HashMap::new();
        let mut source = rng(2024);
        let trials = 6000;
        for _ in 0..trials {
            let mut engine = RoundEngine::new();
            engine.start_round(&catalog, 3, &mut source).unwrap();
            let order = engine.results().iter().map(|q| q.code().to_string()).collect();
            *counts.entry(order).or_default() += 1;
        }
        assert_eq!(counts.len(), 6);
        for count in counts.values() {
            // expected 1000 per permutation
            assert!((800..1200).contains(count), "skewed count {count}");
        }
    }

    #[test]
    fn correct_answer_scores_one_point() {
        let mut engine = RoundEngine::new();
        engine.start_round(&three(), 3, &mut rng(3)).unwrap();
        let name = engine.current_question().unwrap().display_name().to_uppercase();
        assert!(engine.submit_answer(&format!("  {name}!")).unwrap());
        assert_eq!(engine.score(), 1);
        assert!(engine.current_question().unwrap().is_correct());
    }

    #[test]
    fn wrong_answer_is_kept_verbatim() {
        let mut engine = RoundEngine::new();
        engine.start_round(&three(), 3, &mut rng(3)).unwrap();
        assert!(!engine.submit_answer("Zażółć Gęślą").unwrap());
        let question = engine.current_question().unwrap();
        assert_eq!(engine.score(), 0);
        assert!(!question.is_correct());
        assert_eq!(question.user_answer(), Some("Zażółć Gęślą"));
    }

    #[test]
    fn alternate_spellings_are_accepted() {
        let catalog = vec![country("IT", "🇮🇹", &["Włochy", "Italia"])];
        let mut engine = RoundEngine::new();
        engine.start_round(&catalog, 1, &mut rng(0)).unwrap();
        assert!(engine.submit_answer("italia").unwrap());
        assert!(engine.submit_answer("wlochy").unwrap());
        assert_eq!(engine.score(), 1);
    }

    #[test]
    fn resubmission_replaces_previous_outcome() {
        let catalog = vec![country("PL", "🇵🇱", &["Polska"])];
        let mut engine = RoundEngine::new();
        engine.start_round(&catalog, 1, &mut rng(0)).unwrap();

        assert!(engine.submit_answer("Polska").unwrap());
        assert!(engine.submit_answer("polska").unwrap());
        assert_eq!(engine.score(), 1);

        assert!(!engine.submit_answer("Czechy").unwrap());
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.current_question().unwrap().user_answer(), Some("Czechy"));
    }

    #[test]
    fn mark_unknown_is_always_wrong() {
        let catalog = vec![country("PL", "🇵🇱", &["Polska"])];
        let mut engine = RoundEngine::new();
        engine.start_round(&catalog, 1, &mut rng(0)).unwrap();
        engine.submit_answer("Polska").unwrap();

        // Placeholder matching the name must not be scored.
        engine.mark_unknown("Polska").unwrap();
        let question = engine.current_question().unwrap();
        assert!(!question.is_correct());
        assert_eq!(question.user_answer(), Some("Polska"));
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn skip_marker_does_not_depend_on_answer_text() {
        let catalog = vec![country("PL", "🇵🇱", &["Polska"])];
        let mut engine = RoundEngine::new();
        engine.start_round(&catalog, 1, &mut rng(0)).unwrap();

        // Typing the placeholder text is an answer, not a skip.
        engine.submit_answer("Nie wiem").unwrap();
        assert!(!engine.current_question().unwrap().is_skipped());

        engine.mark_unknown("Nie wiem").unwrap();
        assert!(engine.current_question().unwrap().is_skipped());

        engine.submit_answer("Polska").unwrap();
        let question = engine.current_question().unwrap();
        assert!(!question.is_skipped());
        assert!(question.is_correct());
    }

    #[test]
    fn advancing_through_all_questions_finishes_round() {
        let catalog = twelve();
        let mut engine = RoundEngine::new();
        engine.start_round(&catalog, 10, &mut rng(5)).unwrap();
        for i in 0..10 {
            assert!(!engine.is_finished());
            if i % 3 == 0 {
                let name = engine.current_question().unwrap().display_name().to_string();
                engine.submit_answer(&name).unwrap();
            }
            engine.advance().unwrap();
        }
        assert!(engine.is_finished());
        assert_eq!(engine.progress(), None);
        let correct = engine.correct_results().unwrap();
        let incorrect = engine.incorrect_results().unwrap();
        assert_eq!(correct.len() + incorrect.len(), 10);
        assert_eq!(correct.len(), 4);
        assert_eq!(engine.score(), 4);
    }

    #[test]
    fn finished_round_rejects_further_calls() {
        let catalog = vec![country("PL", "🇵🇱", &["Polska"])];
        let mut engine = RoundEngine::new();
        engine.start_round(&catalog, 1, &mut rng(0)).unwrap();
        engine.advance().unwrap();

        assert_eq!(engine.current_question(), Err(RoundError::RoundFinished));
        assert_eq!(engine.submit_answer("Polska"), Err(RoundError::RoundFinished));
        assert_eq!(engine.mark_unknown("?"), Err(RoundError::RoundFinished));
        assert_eq!(engine.advance(), Err(RoundError::RoundFinished));
    }

    #[test]
    fn calls_before_start_are_rejected() {
        let mut engine = RoundEngine::new();
        assert_eq!(engine.current_question(), Err(RoundError::NotStarted));
        assert_eq!(engine.submit_answer("x"), Err(RoundError::NotStarted));
        assert_eq!(engine.correct_results(), Err(RoundError::NotStarted));
        assert!(!engine.is_finished());
    }

    #[test]
    fn partitions_require_finished_round() {
        let mut engine = RoundEngine::new();
        engine.start_round(&three(), 2, &mut rng(0)).unwrap();
        assert_eq!(engine.incorrect_results(), Err(RoundError::RoundInProgress));
        assert_eq!(engine.summary(), Err(RoundError::RoundInProgress));
    }

    #[test]
    fn partitions_preserve_round_order() {
        let catalog = twelve();
        let mut engine = RoundEngine::new();
        engine.start_round(&catalog, 8, &mut rng(11)).unwrap();
        let order: Vec<String> = engine
            .results()
            .iter()
            .map(|q| q.code().to_string())
            .collect();
        for i in 0..8 {
            if i % 2 == 1 {
                let name = engine.current_question().unwrap().display_name().to_string();
                engine.submit_answer(&name).unwrap();
            }
            engine.advance().unwrap();
        }
        let correct: Vec<&str> = engine
            .correct_results()
            .unwrap()
            .into_iter()
            .map(|q| q.code())
            .collect();
        let incorrect: Vec<&str> = engine
            .incorrect_results()
            .unwrap()
            .into_iter()
            .map(|q| q.code())
            .collect();
        let expected_correct: Vec<&str> = order
            .iter()
            .skip(1)
            .step_by(2)
            .map(String::as_str)
            .collect();
        let expected_incorrect: Vec<&str> = order.iter().step_by(2).map(String::as_str).collect();
        assert_eq!(correct, expected_correct);
        assert_eq!(incorrect, expected_incorrect);
    }

    #[test]
    fn three_country_scenario() {
        let catalog = three();
        let mut engine = RoundEngine::new();
        engine.start_round(&catalog, 3, &mut rng(99)).unwrap();

        let mut codes: Vec<&str> = engine.results().iter().map(|q| q.code()).collect();
        codes.sort_unstable();
        assert_eq!(codes, vec!["DE", "FR", "PL"]);

        let mut expected_score = 0;
        while !engine.is_finished() {
            let code = engine.current_question().unwrap().code().to_string();
            match code.as_str() {
                "PL" => {
                    assert!(engine.submit_answer("polska").unwrap());
                    expected_score += 1;
                }
                "DE" => {
                    assert!(!engine.submit_answer("niemcyy").unwrap());
                    assert_eq!(
                        engine.current_question().unwrap().user_answer(),
                        Some("niemcyy")
                    );
                }
                _ => {}
            }
            engine.advance().unwrap();
        }

        assert!(engine.is_finished());
        assert_eq!(engine.score(), expected_score);

        let summary = engine.summary().unwrap();
        assert_eq!(summary.score, 1);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.correct.len(), 1);
        assert_eq!(summary.correct[0].name, "Polska");
        let de = summary.incorrect.iter().find(|e| e.name == "Niemcy").unwrap();
        assert_eq!(de.answer.as_deref(), Some("niemcyy"));
        let fr = summary.incorrect.iter().find(|e| e.name == "Francja").unwrap();
        assert_eq!(fr.answer, None);
    }

    #[test]
    fn last_question_is_reported() {
        let mut engine = RoundEngine::new();
        engine.start_round(&three(), 2, &mut rng(0)).unwrap();
        assert!(!engine.is_last_question());
        engine.advance().unwrap();
        assert!(engine.is_last_question());
        engine.advance().unwrap();
        assert!(!engine.is_last_question());
    }
}
