//! A recording environment and fixture for lifecycle tests.
//!
//! Every lifecycle hook appends an [`Event`] to a shared log so tests can
//! assert the exact order in which the runner drove them.

use std::cell::RefCell;
use std::rc::Rc;

use harness_core::{Environment, Fixture, HarnessError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    EnvSetUp,
    EnvTearDown,
    SetUp(u32),
    Body(u32, &'static str),
    TearDown(u32),
}

pub type EventLog = Rc<RefCell<Vec<Event>>>;

/// Hands out fixture ids and records environment hooks.
pub struct RecordingEnvironment {
    pub log: EventLog,
    next_id: u32,
    /// Make the set-up of this fixture id fail.
    pub fail_set_up_of: Option<u32>,
}

impl RecordingEnvironment {
    pub fn new() -> (Self, EventLog) {
        let log = EventLog::default();
        (
            Self {
                log: log.clone(),
                next_id: 0,
                fail_set_up_of: None,
            },
            log,
        )
    }
}

impl Environment for RecordingEnvironment {
    fn set_up(&mut self) {
        self.log.borrow_mut().push(Event::EnvSetUp);
    }

    fn tear_down(&mut self) {
        self.log.borrow_mut().push(Event::EnvTearDown);
    }
}

/// Per-case state: an id and a scratch vector that must start empty.
pub struct RecordingFixture {
    pub id: u32,
    pub values: Vec<i32>,
    log: EventLog,
}

impl RecordingFixture {
    pub fn record(&self, what: &'static str) {
        self.log.borrow_mut().push(Event::Body(self.id, what));
    }
}

impl Fixture for RecordingFixture {
    type Env = RecordingEnvironment;

    fn set_up(env: &mut RecordingEnvironment) -> Result<Self, HarnessError> {
        let id = env.next_id;
        env.next_id += 1;
        if env.fail_set_up_of == Some(id) {
            return Err(HarnessError::SetUp(format!("fixture {id} refused")));
        }
        env.log.borrow_mut().push(Event::SetUp(id));
        Ok(Self {
            id,
            values: Vec::new(),
            log: env.log.clone(),
        })
    }

    fn tear_down(self, env: &mut RecordingEnvironment) {
        env.log.borrow_mut().push(Event::TearDown(self.id));
    }
}
