use std::{
    collections::HashSet,
    path::Path,
};

use rand::{
    rngs::StdRng,
    seq::{
        IndexedRandom,
        SliceRandom,
    },
    Rng,
    SeedableRng,
};

use crate::core::Entry;

/// Number of candidate answers shown per question.
pub const CHOICE_COUNT: usize = 4;
const DISTRACTOR_COUNT: usize = CHOICE_COUNT - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Random,
    Sequential,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The entry set has zero entries. Left only by receiving a non-empty set.
    Empty,
    /// A question is displayed and awaiting a guess. Incorrect guesses stay
    /// here; retries are unlimited.
    Ready,
    /// A correct guess was made; choices are dead until the deferred advance.
    Answered,
}

/// Signals handed back to the host. The host renders them; the engine never
/// touches presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizEvent {
    Empty,
    QuestionReady { prompt: String, meaning: String, choices: Vec<String> },
    AnswerResult { correct: bool, selected: String },
}

pub struct QuizEngine {
    entries: Vec<Entry>,
    mode: Mode,
    cursor: usize,
    phase: Phase,
    current: Option<Entry>,
    choices: Vec<String>,
    generation: u64,
    rng: StdRng,
}

impl QuizEngine {
    pub fn new(entries: Vec<Entry>, mode: Mode) -> Self {
        Self::with_rng(entries, mode, StdRng::from_os_rng())
    }

    /// Seam for deterministic tests.
    pub fn with_rng(entries: Vec<Entry>, mode: Mode, rng: StdRng) -> Self {
        Self {
            entries,
            mode,
            cursor: 0,
            phase: Phase::Empty,
            current: None,
            choices: Vec::new(),
            generation: 0,
            rng,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Bumped whenever the entry set or mode is swapped. A deferred advance
    /// scheduled under an older generation must not fire.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn current(&self) -> Option<&Entry> {
        self.current.as_ref()
    }

    pub fn current_audio(&self) -> Option<&Path> {
        self.current.as_ref().map(|entry| entry.audio.as_path())
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    /// Swaps in a new entry set: cursor back to the start, pending advances
    /// invalidated, and the next question produced immediately.
    pub fn set_entries(&mut self, entries: Vec<Entry>) -> QuizEvent {
        self.entries = entries;
        self.cursor = 0;
        self.generation += 1;
        self.new_question()
    }

    pub fn set_mode(&mut self, mode: Mode) -> QuizEvent {
        self.mode = mode;
        self.cursor = 0;
        self.generation += 1;
        self.new_question()
    }

    /// Replaces the displayed question wholesale. With an empty entry set
    /// this is a no-op apart from clearing the display state.
    pub fn new_question(&mut self) -> QuizEvent {
        if self.entries.is_empty() {
            self.phase = Phase::Empty;
            self.current = None;
            self.choices.clear();
            return QuizEvent::Empty;
        }

        let entry = match self.mode {
            Mode::Random => {
                // Uniform draw with replacement across calls; repeats across
                // successive questions are possible.
                let index = self.rng.random_range(0..self.entries.len());
                self.entries[index].clone()
            }
            Mode::Sequential => {
                let entry = self.entries[self.cursor].clone();
                self.cursor = (self.cursor + 1) % self.entries.len();
                entry
            }
        };

        self.choices = self.build_choices(&entry.answer);
        let event = QuizEvent::QuestionReady {
            prompt: entry.prompt.clone(),
            meaning: entry.meaning.clone(),
            choices: self.choices.clone(),
        };
        self.current = Some(entry);
        self.phase = Phase::Ready;
        event
    }

    /// Exact string match against the current answer. Correct moves to
    /// `Answered`; incorrect stays `Ready`. Ignored outside `Ready`.
    pub fn submit(&mut self, selected: &str) -> Option<QuizEvent> {
        if self.phase != Phase::Ready {
            return None;
        }
        let current = self.current.as_ref()?;

        let correct = selected == current.answer;
        if correct {
            self.phase = Phase::Answered;
        }
        Some(QuizEvent::AnswerResult { correct, selected: selected.to_string() })
    }

    fn build_choices(&mut self, answer: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut pool: Vec<&String> = Vec::new();
        for entry in &self.entries {
            if entry.answer != answer && seen.insert(entry.answer.as_str()) {
                pool.push(&entry.answer);
            }
        }

        let mut choices: Vec<String> = if pool.len() >= DISTRACTOR_COUNT {
            let mut picked: Vec<String> = pool
                .choose_multiple(&mut self.rng, DISTRACTOR_COUNT)
                .map(|value| (*value).clone())
                .collect();
            picked.push(answer.to_string());
            picked
        } else {
            // Fewer than three distinct wrong readings exist. Sample from the
            // full answer multiset, deduplicate, append the true answer, then
            // pad with it so exactly four choices are always on screen.
            let all: Vec<&String> = self.entries.iter().map(|entry| &entry.answer).collect();
            let take = all.len().min(DISTRACTOR_COUNT);
            let mut picked: Vec<String> = Vec::new();
            for value in all.choose_multiple(&mut self.rng, take) {
                if !picked.iter().any(|existing| existing == *value) {
                    picked.push((*value).clone());
                }
            }
            picked.push(answer.to_string());
            while picked.len() < CHOICE_COUNT {
                picked.push(answer.to_string());
            }
            picked
        };

        choices.shuffle(&mut self.rng);
        choices
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::{
            HashMap,
            HashSet,
        },
        path::PathBuf,
    };

    use super::*;

    fn entry(prompt: &str, answer: &str) -> Entry {
        Entry {
            prompt: prompt.to_string(),
            answer: answer.to_string(),
            audio: PathBuf::from(format!("audio/{prompt}.wav")),
            meaning: format!("meaning of {prompt}"),
        }
    }

    fn numbered_entries(count: usize) -> Vec<Entry> {
        (0..count).map(|i| entry(&format!("p{i}"), &format!("a{i}"))).collect()
    }

    fn engine(entries: Vec<Entry>, mode: Mode, seed: u64) -> QuizEngine {
        QuizEngine::with_rng(entries, mode, StdRng::seed_from_u64(seed))
    }

    fn expect_question(event: QuizEvent) -> (String, Vec<String>) {
        match event {
            QuizEvent::QuestionReady { prompt, choices, .. } => (prompt, choices),
            other => panic!("expected QuestionReady, got {other:?}"),
        }
    }

    #[test]
    fn four_choices_always_contain_the_answer() {
        let mut engine = engine(numbered_entries(6), Mode::Random, 11);
        for _ in 0..50 {
            let (_, choices) = expect_question(engine.new_question());
            assert_eq!(choices.len(), CHOICE_COUNT);
            let answer = &engine.current().unwrap().answer;
            assert!(choices.contains(answer));
        }
    }

    #[test]
    fn distinct_answer_sets_yield_distinct_choices() {
        let mut engine = engine(numbered_entries(8), Mode::Random, 23);
        for _ in 0..50 {
            let (_, choices) = expect_question(engine.new_question());
            let unique: HashSet<&String> = choices.iter().collect();
            assert_eq!(unique.len(), CHOICE_COUNT);
        }
    }

    #[test]
    fn sequential_visits_every_entry_once_then_wraps() {
        let entries = numbered_entries(5);
        let mut engine = engine(entries.clone(), Mode::Sequential, 3);

        let mut prompts = Vec::new();
        for _ in 0..5 {
            let (prompt, _) = expect_question(engine.new_question());
            prompts.push(prompt);
        }
        let expected: Vec<String> = entries.iter().map(|e| e.prompt.clone()).collect();
        assert_eq!(prompts, expected);

        let (sixth, _) = expect_question(engine.new_question());
        assert_eq!(sixth, entries[0].prompt);
    }

    #[test]
    fn random_draws_are_roughly_uniform() {
        let mut engine = engine(numbered_entries(5), Mode::Random, 7);
        let mut counts: HashMap<String, u32> = HashMap::new();

        let draws = 5000;
        for _ in 0..draws {
            let (prompt, _) = expect_question(engine.new_question());
            *counts.entry(prompt).or_default() += 1;
        }

        let expected = draws as f64 / 5.0;
        assert_eq!(counts.len(), 5);
        for (prompt, count) in counts {
            let deviation = (count as f64 - expected).abs() / expected;
            assert!(deviation < 0.15, "{prompt} drawn {count} times, expected ~{expected}");
        }
    }

    #[test]
    fn correct_submission_answers_the_question() {
        let mut engine = engine(numbered_entries(6), Mode::Sequential, 1);
        engine.new_question();

        let answer = engine.current().unwrap().answer.clone();
        let event = engine.submit(&answer).unwrap();
        assert_eq!(event, QuizEvent::AnswerResult { correct: true, selected: answer });
        assert_eq!(engine.phase(), Phase::Answered);

        // Choices are dead until the advance fires.
        assert!(engine.submit("a0").is_none());
    }

    #[test]
    fn incorrect_submission_keeps_the_question_live() {
        let mut engine = engine(numbered_entries(6), Mode::Sequential, 1);
        engine.new_question();

        let event = engine.submit("not a reading").unwrap();
        assert_eq!(
            event,
            QuizEvent::AnswerResult { correct: false, selected: "not a reading".to_string() }
        );
        assert_eq!(engine.phase(), Phase::Ready);

        // Retries are unlimited, including the same wrong choice again.
        assert!(engine.submit("not a reading").is_some());
        let answer = engine.current().unwrap().answer.clone();
        let event = engine.submit(&answer).unwrap();
        assert_eq!(event, QuizEvent::AnswerResult { correct: true, selected: answer });
    }

    #[test]
    fn empty_set_signals_empty_and_never_panics() {
        let mut engine = engine(Vec::new(), Mode::Random, 9);
        assert_eq!(engine.new_question(), QuizEvent::Empty);
        assert_eq!(engine.phase(), Phase::Empty);
        assert!(engine.choices().is_empty());
        assert!(engine.current().is_none());
        assert!(engine.submit("anything").is_none());

        assert_eq!(engine.set_entries(Vec::new()), QuizEvent::Empty);
    }

    #[test]
    fn two_entry_set_pads_to_four_choices() {
        let entries = vec![entry("你好", "nǐ hǎo"), entry("谢谢", "xiè xiè")];
        let mut engine = engine(entries, Mode::Random, 5);

        for _ in 0..20 {
            let (_, choices) = expect_question(engine.new_question());
            assert_eq!(choices.len(), CHOICE_COUNT);
            let answer = &engine.current().unwrap().answer;
            assert!(choices.contains(answer));
            for choice in &choices {
                assert!(choice == "nǐ hǎo" || choice == "xiè xiè");
            }
        }
    }

    #[test]
    fn single_entry_set_pads_with_the_answer() {
        let mut engine = engine(vec![entry("一", "yī")], Mode::Sequential, 2);
        let (_, choices) = expect_question(engine.new_question());
        assert_eq!(choices, vec!["yī"; CHOICE_COUNT]);
    }

    #[test]
    fn swapping_entries_resets_cursor_and_bumps_generation() {
        let mut engine = engine(numbered_entries(5), Mode::Sequential, 4);
        engine.new_question();
        engine.new_question();
        let generation = engine.generation();

        let replacement = numbered_entries(3);
        let (prompt, _) = expect_question(engine.set_entries(replacement.clone()));
        assert_eq!(prompt, replacement[0].prompt);
        assert_eq!(engine.generation(), generation + 1);
    }

    #[test]
    fn mode_switch_restarts_the_sequence() {
        let entries = numbered_entries(4);
        let mut engine = engine(entries.clone(), Mode::Sequential, 8);
        engine.new_question();
        engine.new_question();

        let generation = engine.generation();
        engine.set_mode(Mode::Random);
        assert_eq!(engine.generation(), generation + 1);

        let (prompt, _) = expect_question(engine.set_mode(Mode::Sequential));
        assert_eq!(prompt, entries[0].prompt);
    }
}
