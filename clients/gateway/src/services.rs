use crate::banter::BossBanter;
use crate::ledger::ScoreLedger;
use crate::voice::Voice;

/// Everything the HTTP surface and the demo driver need, constructed once
/// at startup and passed down explicitly.
pub struct Services {
    pub banter: Box<dyn BossBanter>,
    pub voice: Box<dyn Voice>,
    pub ledger: Box<dyn ScoreLedger>,
}
