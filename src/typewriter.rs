use crate::config::MotionConfig;
use crate::log::{LogLevel, Logger};
use crate::page::TYPEWRITER_TARGET_ID;
use crate::schedule::Scheduler;
use crate::surface::Surface;
use serde_json::json;
use std::rc::Rc;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypewriterState {
    Idle,
    /// `typed` characters of the name are on screen.
    Revealing { typed: usize },
    Done,
}

/// Types the hero name back in one character at a time.
///
/// The machine never touches a clock: [`Typewriter::start`] and
/// [`Typewriter::step`] return how long to wait before the next step, and
/// the caller owns the scheduling.
pub struct Typewriter<E> {
    target: Option<E>,
    text: Vec<char>,
    state: TypewriterState,
    start_delay: Duration,
    char_interval: Duration,
}

impl<E: Clone + PartialEq> Typewriter<E> {
    /// Captures the target's current text, which is the text to type.
    pub fn new<S>(surface: &S, config: &MotionConfig) -> Self
    where
        S: Surface<Element = E>,
    {
        let target = surface.by_id(TYPEWRITER_TARGET_ID);
        let text = target
            .as_ref()
            .map(|element| surface.text(element).chars().collect())
            .unwrap_or_default();

        Self {
            target,
            text,
            state: TypewriterState::Idle,
            start_delay: config.typewriter_start_delay,
            char_interval: config.typewriter_char_interval,
        }
    }

    pub fn state(&self) -> TypewriterState {
        self.state
    }

    pub fn has_target(&self) -> bool {
        self.target.is_some()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Delay before the first step, or `None` when there is nothing to type
    /// into. Without a target the machine goes straight to `Done`.
    pub fn start(&mut self) -> Option<Duration> {
        if self.state != TypewriterState::Idle {
            return None;
        }
        if self.target.is_none() {
            self.state = TypewriterState::Done;
            return None;
        }
        Some(self.start_delay)
    }

    /// Advances one transition and returns the delay before the next one.
    pub fn step<S>(&mut self, surface: &S) -> Option<Duration>
    where
        S: Surface<Element = E>,
    {
        let Some(target) = self.target.as_ref() else {
            self.state = TypewriterState::Done;
            return None;
        };
        if !surface.is_connected(target) {
            self.state = TypewriterState::Done;
            return None;
        }

        match self.state {
            TypewriterState::Idle => {
                surface.set_text(target, "");
                surface.set_style(target, "visibility", "visible");
                self.advance_to(0)
            }
            TypewriterState::Revealing { typed } => {
                let typed = typed + 1;
                let shown: String = self.text[..typed].iter().collect();
                surface.set_text(target, &shown);
                self.advance_to(typed)
            }
            TypewriterState::Done => None,
        }
    }

    fn advance_to(&mut self, typed: usize) -> Option<Duration> {
        if typed >= self.text.len() {
            self.state = TypewriterState::Done;
            None
        } else {
            self.state = TypewriterState::Revealing { typed };
            Some(self.char_interval)
        }
    }
}

/// Runs the machine to completion on `scheduler`, each step scheduling the
/// next. There is no cancellation; a detached target ends the chain.
pub fn run<S, K>(mut machine: Typewriter<S::Element>, surface: Rc<S>, scheduler: Rc<K>, logger: Logger)
where
    S: Surface + 'static,
    S::Element: 'static,
    K: Scheduler + 'static,
{
    if !machine.has_target() {
        logger.event(
            LogLevel::Warn,
            "element_missing",
            json!({ "selector": format!("#{TYPEWRITER_TARGET_ID}") }),
        );
    }

    if let Some(delay) = machine.start() {
        schedule_step(machine, surface, scheduler, logger, delay);
    }
}

fn schedule_step<S, K>(
    machine: Typewriter<S::Element>,
    surface: Rc<S>,
    scheduler: Rc<K>,
    logger: Logger,
    delay: Duration,
) where
    S: Surface + 'static,
    S::Element: 'static,
    K: Scheduler + 'static,
{
    let next_scheduler = Rc::clone(&scheduler);
    scheduler.schedule(
        delay,
        Box::new(move || {
            let mut machine = machine;
            match machine.step(&*surface) {
                Some(next) => schedule_step(machine, surface, next_scheduler, logger, next),
                None => logger.event(
                    LogLevel::Debug,
                    "typewriter_done",
                    json!({ "chars": machine.len() }),
                ),
            }
        }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeSurface, VirtualScheduler};

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn page_with_name(name: &str) -> (Rc<FakeSurface>, usize) {
        let surface = Rc::new(FakeSurface::new());
        let target = surface.add(&["#heroName"]);
        surface.put_text(target, name);
        (surface, target)
    }

    fn start(surface: &Rc<FakeSurface>) -> Rc<VirtualScheduler> {
        let scheduler = Rc::new(VirtualScheduler::new());
        let machine = Typewriter::new(&**surface, &MotionConfig::default());
        run(
            machine,
            Rc::clone(surface),
            Rc::clone(&scheduler),
            Logger::new(LogLevel::Warn),
        );
        scheduler
    }

    #[test]
    fn name_is_complete_after_delay_plus_interval_per_char() {
        let (surface, target) = page_with_name("Jane Doe");
        let scheduler = start(&surface);

        scheduler.advance_to(ms(1_139));
        assert_eq!(surface.text_of(target), "Jane Do");

        scheduler.advance_to(ms(1_140));
        assert_eq!(surface.text_of(target), "Jane Doe");
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn intermediate_samples_show_a_growing_prefix() {
        let name = "Jane Doe";
        let (surface, target) = page_with_name(name);
        let scheduler = start(&surface);

        for t in (500..1_140).step_by(20) {
            scheduler.advance_to(ms(t));
            let expected = ((t - 500) / 80) as usize;
            assert_eq!(surface.text_of(target), &name[..expected], "t={t}");
        }
    }

    #[test]
    fn target_is_made_visible_when_revealing_starts() {
        let (surface, target) = page_with_name("Ada");
        let scheduler = start(&surface);

        scheduler.advance_to(ms(499));
        assert_eq!(surface.text_of(target), "Ada");
        assert_eq!(surface.style(target, "visibility"), None);

        scheduler.advance_to(ms(500));
        assert_eq!(surface.text_of(target), "");
        assert_eq!(surface.style(target, "visibility").as_deref(), Some("visible"));
    }

    #[test]
    fn multibyte_names_are_typed_per_character() {
        let (surface, target) = page_with_name("Zoë Ñ");
        let scheduler = start(&surface);

        scheduler.advance_to(ms(500 + 3 * 80));
        assert_eq!(surface.text_of(target), "Zoë");

        scheduler.advance_to(ms(500 + 5 * 80));
        assert_eq!(surface.text_of(target), "Zoë Ñ");
    }

    #[test]
    fn missing_target_skips_the_effect() {
        let surface = FakeSurface::new();
        let mut machine = Typewriter::new(&surface, &MotionConfig::default());

        assert_eq!(machine.start(), None);
        assert_eq!(machine.state(), TypewriterState::Done);
    }

    #[test]
    fn detached_target_stops_the_chain_quietly() {
        let (surface, target) = page_with_name("Jane Doe");
        let scheduler = start(&surface);

        scheduler.advance_to(ms(740));
        assert_eq!(surface.text_of(target), "Jan");

        surface.detach(target);
        scheduler.advance_to(ms(5_000));
        assert_eq!(surface.text_of(target), "Jan");
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn state_machine_walks_idle_revealing_done() {
        let (surface, _) = page_with_name("Hi");
        let mut machine = Typewriter::new(&*surface, &MotionConfig::default());

        assert_eq!(machine.state(), TypewriterState::Idle);
        assert_eq!(machine.start(), Some(ms(500)));
        assert_eq!(machine.step(&*surface), Some(ms(80)));
        assert_eq!(machine.state(), TypewriterState::Revealing { typed: 0 });
        assert_eq!(machine.step(&*surface), Some(ms(80)));
        assert_eq!(machine.state(), TypewriterState::Revealing { typed: 1 });
        assert_eq!(machine.step(&*surface), None);
        assert_eq!(machine.state(), TypewriterState::Done);
        assert_eq!(machine.step(&*surface), None);
    }
}
