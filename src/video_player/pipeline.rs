// SPDX-License-Identifier: MPL-2.0
//! Exclusive ownership of one adaptive-streaming pipeline.
//!
//! A [`PipelineSlot`] holds at most one live [`StreamingClient`]. Attaching a
//! new source destroys the previous client before the next one is created, and
//! every client is destroyed exactly once: on replacement, on
//! [`PipelineSlot::release`], or when the slot is dropped.

use crate::application::port::{
    AttachId, MediaElement, PipelineRole, StreamingClient, StreamingClientFactory,
};
use crate::error::Result;

struct LivePipeline {
    attach: AttachId,
    client: Box<dyn StreamingClient>,
    destroyed: bool,
}

impl LivePipeline {
    fn destroy(&mut self, role: PipelineRole) {
        if !self.destroyed {
            self.destroyed = true;
            self.client.destroy();
            tracing::debug!(?role, attach = self.attach.0, "pipeline released");
        }
    }
}

/// One role's pipeline plus its attach generation counter.
pub struct PipelineSlot {
    role: PipelineRole,
    generation: u64,
    live: Option<LivePipeline>,
}

impl PipelineSlot {
    #[must_use]
    pub fn new(role: PipelineRole) -> Self {
        Self {
            role,
            generation: 0,
            live: None,
        }
    }

    /// Attach id of the live pipeline, if any.
    #[must_use]
    pub fn current(&self) -> Option<AttachId> {
        self.live.as_ref().map(|p| p.attach)
    }

    /// Whether `attach` identifies the live pipeline.
    #[must_use]
    pub fn is_current(&self, attach: AttachId) -> bool {
        self.current() == Some(attach)
    }

    /// Replaces the live pipeline with a fresh client loading `url` into `element`.
    ///
    /// The previous client is destroyed first. On failure the new client is
    /// destroyed as well and the slot is left empty.
    ///
    /// # Errors
    ///
    /// Returns the client's error if loading or attaching fails.
    pub fn attach(
        &mut self,
        factory: &dyn StreamingClientFactory,
        element: &mut dyn MediaElement,
        url: &str,
    ) -> Result<AttachId> {
        self.release();

        self.generation += 1;
        let attach = AttachId(self.generation);
        let mut pipeline = LivePipeline {
            attach,
            client: factory.create(self.role, attach),
            destroyed: false,
        };

        let bound = pipeline
            .client
            .load_source(url)
            .and_then(|()| pipeline.client.attach_media(element));
        if let Err(err) = bound {
            pipeline.destroy(self.role);
            return Err(err);
        }

        tracing::debug!(role = ?self.role, attach = attach.0, url, "pipeline attached");
        self.live = Some(pipeline);
        Ok(attach)
    }

    /// Destroys the live pipeline, if any.
    pub fn release(&mut self) {
        if let Some(mut pipeline) = self.live.take() {
            pipeline.destroy(self.role);
        }
    }
}

impl Drop for PipelineSlot {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for PipelineSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineSlot")
            .field("role", &self.role)
            .field("current", &self.current())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::test_utils::FakeElement;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Log {
        loaded: Vec<String>,
        destroyed: Vec<AttachId>,
    }

    struct Client {
        attach: AttachId,
        log: Rc<RefCell<Log>>,
        fail_load: bool,
    }

    impl StreamingClient for Client {
        fn load_source(&mut self, url: &str) -> Result<()> {
            if self.fail_load {
                return Err(Error::playback("rejected"));
            }
            self.log.borrow_mut().loaded.push(url.to_string());
            Ok(())
        }

        fn attach_media(&mut self, _: &mut dyn MediaElement) -> Result<()> {
            Ok(())
        }

        fn destroy(&mut self) {
            self.log.borrow_mut().destroyed.push(self.attach);
        }
    }

    struct Factory {
        log: Rc<RefCell<Log>>,
        fail_load: bool,
    }

    impl StreamingClientFactory for Factory {
        fn create(&self, _: PipelineRole, attach: AttachId) -> Box<dyn StreamingClient> {
            Box::new(Client {
                attach,
                log: Rc::clone(&self.log),
                fail_load: self.fail_load,
            })
        }
    }

    fn factory(fail_load: bool) -> (Factory, Rc<RefCell<Log>>) {
        let log = Rc::new(RefCell::new(Log::default()));
        (
            Factory {
                log: Rc::clone(&log),
                fail_load,
            },
            log,
        )
    }

    #[test]
    fn reattach_destroys_previous_client_first() {
        let (factory, log) = factory(false);
        let mut slot = PipelineSlot::new(PipelineRole::Primary);
        let first = slot.attach(&factory, &mut FakeElement::default(), "u1").unwrap();
        let second = slot.attach(&factory, &mut FakeElement::default(), "u2").unwrap();

        assert!(second > first);
        assert!(slot.is_current(second));
        assert!(!slot.is_current(first));
        assert_eq!(log.borrow().loaded, vec!["u1", "u2"]);
        assert_eq!(log.borrow().destroyed, vec![first]);
    }

    #[test]
    fn release_destroys_exactly_once() {
        let (factory, log) = factory(false);
        let mut slot = PipelineSlot::new(PipelineRole::Preview);
        let attach = slot.attach(&factory, &mut FakeElement::default(), "u").unwrap();
        slot.release();
        slot.release();
        drop(slot);
        assert_eq!(log.borrow().destroyed, vec![attach]);
    }

    #[test]
    fn drop_releases_live_pipeline() {
        let (factory, log) = factory(false);
        {
            let mut slot = PipelineSlot::new(PipelineRole::Primary);
            slot.attach(&factory, &mut FakeElement::default(), "u").unwrap();
        }
        assert_eq!(log.borrow().destroyed.len(), 1);
    }

    #[test]
    fn failed_attach_leaves_slot_empty_and_destroys_client() {
        let (factory, log) = factory(true);
        let mut slot = PipelineSlot::new(PipelineRole::Primary);
        assert!(slot.attach(&factory, &mut FakeElement::default(), "u").is_err());
        assert_eq!(slot.current(), None);
        assert_eq!(log.borrow().destroyed, vec![AttachId(1)]);
    }
}
