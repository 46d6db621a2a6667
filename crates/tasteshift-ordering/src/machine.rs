//! The ordering state machine.

use tasteshift_types::{PromptKey, SectionId};

/// Progress of the main prompt sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Phase {
    #[default]
    Idle,
    ProteinPrompted,
    RicePrompted,
    BeansPrompted,
    ToppingsPrompted,
    Complete,
}

impl Phase {
    fn prompted(section: SectionId) -> Self {
        match section {
            SectionId::Protein => Self::ProteinPrompted,
            SectionId::Rice => Self::RicePrompted,
            SectionId::Beans => Self::BeansPrompted,
            SectionId::Toppings => Self::ToppingsPrompted,
        }
    }
}

/// Decides which prompt, if any, each event asks for.
///
/// Pure and synchronous: callers feed it events in dispatch order and act
/// on the returned [`PromptKey`]. Every key is handed out at most once until
/// [`OrderingMachine::reset`], unless it is handed back with
/// [`OrderingMachine::release`].
#[derive(Debug, Clone, Default)]
pub struct OrderingMachine {
    selections: [Option<String>; 4],
    fired: [bool; 5],
    phase: Phase,
    fallback_prompted: bool,
    engaged: bool,
}

impl OrderingMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the skipped-protein prompt has been handed out. Once set it
    /// stays set until reset.
    pub fn fallback_prompted(&self) -> bool {
        self.fallback_prompted
    }

    pub fn has_fired(&self, key: PromptKey) -> bool {
        self.fired[key.index()]
    }

    pub fn selection(&self, section: SectionId) -> Option<&str> {
        self.selections[section.index()].as_deref()
    }

    /// Whether the engagement signal is still awaited.
    pub fn awaiting_engagement(&self) -> bool {
        !self.engaged
    }

    /// The one-time "page engaged" signal. Asks for the protein prompt the
    /// first time unless it already fired. Later calls do nothing.
    pub fn page_engaged(&mut self) -> Option<PromptKey> {
        if self.engaged {
            return None;
        }
        self.engaged = true;
        self.fire(SectionId::Protein.into())
    }

    /// Records a selection and returns the prompt it asks for.
    ///
    /// Selecting outside protein while protein is unset asks for the
    /// fallback prompt and leaves the section unmarked. Otherwise the
    /// section is marked and the next section in order is prompted if it
    /// has not been yet. Selecting toppings completes the sequence.
    pub fn select(&mut self, section: SectionId, item: impl Into<String>) -> Option<PromptKey> {
        self.selections[section.index()] = Some(item.into());

        if self.phase == Phase::Complete {
            return None;
        }

        if self.selection(SectionId::Protein).is_none() && section != SectionId::Protein {
            if self.phase > Phase::ProteinPrompted {
                return None;
            }
            let prompt = self.fire(PromptKey::Fallback);
            if prompt.is_some() {
                self.fallback_prompted = true;
            }
            return prompt;
        }

        self.fired[PromptKey::from(section).index()] = true;
        match section.next() {
            Some(next) => self.fire(next.into()),
            None => {
                self.phase = Phase::Complete;
                tracing::debug!("ordering flow complete");
                None
            }
        }
    }

    /// Hands back a prompt that was never delivered because playback was
    /// busy, so the next trigger can ask for it again.
    ///
    /// A section the user has already chosen from stays marked.
    pub fn release(&mut self, key: PromptKey) {
        if let PromptKey::Section(section) = key {
            if self.selection(section).is_some() {
                return;
            }
        }
        if !std::mem::take(&mut self.fired[key.index()]) {
            return;
        }
        match key {
            PromptKey::Fallback => self.fallback_prompted = false,
            PromptKey::Section(_) if self.phase != Phase::Complete => {
                self.phase = SectionId::ORDER
                    .into_iter()
                    .filter(|s| self.fired[PromptKey::from(*s).index()])
                    .map(Phase::prompted)
                    .max()
                    .unwrap_or_default();
            }
            PromptKey::Section(_) => {}
        }
        tracing::debug!(prompt = %key, "prompt released");
    }

    /// Clears selections, guards and progress. Used on theme switch.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn fire(&mut self, key: PromptKey) -> Option<PromptKey> {
        let slot = &mut self.fired[key.index()];
        if *slot {
            return None;
        }
        *slot = true;
        if let PromptKey::Section(section) = key {
            self.phase = self.phase.max(Phase::prompted(section));
        }
        Some(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROTEIN: PromptKey = PromptKey::Section(SectionId::Protein);
    const RICE: PromptKey = PromptKey::Section(SectionId::Rice);
    const BEANS: PromptKey = PromptKey::Section(SectionId::Beans);
    const TOPPINGS: PromptKey = PromptKey::Section(SectionId::Toppings);

    #[test]
    fn full_sequence_prompts_in_order_then_completes() {
        let mut m = OrderingMachine::new();
        let mut prompts = Vec::new();

        prompts.extend(m.page_engaged());
        assert_eq!(m.phase(), Phase::ProteinPrompted);
        prompts.extend(m.select(SectionId::Protein, "Herbed Chicken"));
        prompts.extend(m.select(SectionId::Rice, "Risotto"));
        prompts.extend(m.select(SectionId::Beans, "Borlotti Beans"));
        assert_eq!(m.phase(), Phase::ToppingsPrompted);
        prompts.extend(m.select(SectionId::Toppings, "Basil Pesto"));

        assert_eq!(prompts, vec![PROTEIN, RICE, BEANS, TOPPINGS]);
        assert_eq!(m.phase(), Phase::Complete);

        assert_eq!(m.select(SectionId::Rice, "Polenta"), None);
        assert_eq!(m.selection(SectionId::Rice), Some("Polenta"));
    }

    #[test]
    fn rice_before_protein_gives_only_fallback() {
        let mut m = OrderingMachine::new();
        assert_eq!(m.select(SectionId::Rice, "Risotto"), Some(PromptKey::Fallback));
        assert!(!m.has_fired(RICE));
        assert!(m.fallback_prompted());
        assert_eq!(m.phase(), Phase::Idle);

        // fallback is one-shot too
        assert_eq!(m.select(SectionId::Beans, "Borlotti Beans"), None);
        assert!(!m.has_fired(BEANS));
    }

    #[test]
    fn recovery_after_fallback_continues_main_sequence() {
        let mut m = OrderingMachine::new();
        m.page_engaged();
        assert_eq!(m.select(SectionId::Rice, "Risotto"), Some(PromptKey::Fallback));

        // rice was never marked, so protein asks for rice
        assert_eq!(m.select(SectionId::Protein, "Garlic Shrimp"), Some(RICE));
        assert_eq!(m.select(SectionId::Rice, "Risotto"), Some(BEANS));
        assert!(m.fallback_prompted());
    }

    #[test]
    fn engagement_fires_once_and_respects_earlier_protein() {
        let mut m = OrderingMachine::new();
        assert_eq!(m.select(SectionId::Protein, "Oxtail"), Some(RICE));
        assert!(m.has_fired(PROTEIN));
        assert_eq!(m.page_engaged(), None);
        assert!(!m.awaiting_engagement());
        assert_eq!(m.page_engaged(), None);
    }

    #[test]
    fn each_prompt_fires_at_most_once() {
        let mut m = OrderingMachine::new();
        let mut seen = Vec::new();
        seen.extend(m.page_engaged());
        for _ in 0..3 {
            for section in SectionId::ORDER {
                seen.extend(m.select(section, "x"));
            }
        }
        let mut deduped = seen.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(seen.len(), deduped.len());
    }

    #[test]
    fn skipping_ahead_prompts_the_following_section() {
        let mut m = OrderingMachine::new();
        m.page_engaged();
        m.select(SectionId::Protein, "Curry Goat");
        assert_eq!(m.select(SectionId::Beans, "Black Beans"), Some(TOPPINGS));
        // beans already marked, rice selection has nothing left to ask
        assert_eq!(m.select(SectionId::Rice, "Coconut Rice"), None);
        assert_eq!(m.phase(), Phase::ToppingsPrompted);
    }

    #[test]
    fn released_prompt_is_asked_for_again() {
        let mut m = OrderingMachine::new();
        m.page_engaged();
        assert_eq!(m.select(SectionId::Protein, "Herbed Chicken"), Some(RICE));
        assert_eq!(m.phase(), Phase::RicePrompted);

        m.release(RICE);
        assert!(!m.has_fired(RICE));
        assert_eq!(m.phase(), Phase::ProteinPrompted);
        assert_eq!(m.select(SectionId::Protein, "Garlic Shrimp"), Some(RICE));
        assert_eq!(m.select(SectionId::Protein, "Garlic Shrimp"), None);
    }

    #[test]
    fn released_fallback_can_fire_again() {
        let mut m = OrderingMachine::new();
        assert_eq!(m.select(SectionId::Rice, "Risotto"), Some(PromptKey::Fallback));
        m.release(PromptKey::Fallback);
        assert!(!m.fallback_prompted());
        assert_eq!(m.select(SectionId::Beans, "Borlotti Beans"), Some(PromptKey::Fallback));
    }

    #[test]
    fn release_keeps_a_chosen_section_marked() {
        let mut m = OrderingMachine::new();
        m.select(SectionId::Protein, "Oxtail");
        m.select(SectionId::Rice, "Coconut Rice");
        m.release(RICE);
        assert!(m.has_fired(RICE));
        assert_eq!(m.select(SectionId::Protein, "Oxtail"), None);
    }

    #[test]
    fn reset_clears_everything() {
        let mut m = OrderingMachine::new();
        m.page_engaged();
        m.select(SectionId::Rice, "Risotto");
        m.reset();
        assert_eq!(m.phase(), Phase::Idle);
        assert!(!m.fallback_prompted());
        assert!(m.awaiting_engagement());
        assert_eq!(m.selection(SectionId::Rice), None);
        assert_eq!(m.page_engaged(), Some(PROTEIN));
    }
}
