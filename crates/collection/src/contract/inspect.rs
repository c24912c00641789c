//! Debug inspection family

use std::io::Write;

use super::{CollectionCore, settle};
use crate::config;
use crate::dump::{self, Halt};
use crate::error::{CollectionError, CollectionResult};

/// Dump and dump-and-die
pub trait Inspect: CollectionCore {
    /// Write a rendering of the collection to `sink`
    fn try_dump_to(&self, sink: &mut dyn Write) -> CollectionResult<()> {
        let _ = sink;
        Err(CollectionError::not_implemented("dump"))
    }

    fn dump_to(&self, sink: &mut dyn Write) {
        if let Err(error) = self.try_dump_to(sink) {
            tracing::trace!(%error, "collection dump skipped");
        }
    }

    /// Write a rendering to the configured sink
    fn try_dump(&self) -> CollectionResult<()> {
        dump::with_target(&config::global().dump, |sink| self.try_dump_to(sink))
    }

    fn dump(&self) {
        if let Err(error) = self.try_dump() {
            tracing::trace!(%error, "collection dump skipped");
        }
    }

    /// Dump, then signal that the caller should terminate
    fn try_dd(&self) -> CollectionResult<Halt> {
        self.try_dump().map_err(|error| {
            if error.is_not_implemented() {
                CollectionError::not_implemented("dd")
            } else {
                error
            }
        })?;
        Ok(Halt::new(config::global().dump.halt_code))
    }

    /// `None` when nothing could be dumped
    #[must_use = "`dd` only signals termination; return early or call `Halt::exit`"]
    fn dd(&self) -> Option<Halt> {
        settle(self.try_dd().map(Some), None)
    }
}

/// Dump through the shared renderer
pub(crate) fn dump_payload<C>(collection: &C, sink: &mut dyn Write) -> CollectionResult<()>
where
    C: CollectionCore + ?Sized,
{
    dump::write_to(
        sink,
        &config::global().dump,
        collection.variant(),
        collection.length(),
        &collection.value(),
    )
}
