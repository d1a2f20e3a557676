//! Which program is currently bound. At most one program per engine is
//! active; activating another one deactivates the previous.

use std::cell::Cell;
use std::rc::Rc;

/// Activation slot shared by an engine and every program compiled against it.
#[derive(Debug, Clone, Default)]
pub(crate) struct ActiveProgram {
    active: Rc<Cell<Option<u64>>>,
    next_id: Rc<Cell<u64>>,
}

impl ActiveProgram {
    /// Hands out a token with a fresh id. New programs start inactive.
    pub fn register(&self) -> ProgramToken {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        ProgramToken {
            id,
            slot: self.clone(),
        }
    }

    pub fn current(&self) -> Option<u64> {
        self.active.get()
    }
}

#[derive(Debug)]
pub(crate) struct ProgramToken {
    id: u64,
    slot: ActiveProgram,
}

impl ProgramToken {
    pub fn activate(&self) {
        self.slot.active.set(Some(self.id));
    }

    pub fn is_active(&self) -> bool {
        self.slot.current() == Some(self.id)
    }
}
