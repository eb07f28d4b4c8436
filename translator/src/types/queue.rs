use strum_macros::{Display, EnumIter};

#[derive(Display, Debug, Clone, PartialEq, Eq, EnumIter, Hash)]
pub enum QueueType {
    /// Worker invocations produced by the dispatcher
    #[strum(serialize = "translation_job_processing")]
    TranslationJobProcessing,
    /// Object-created notifications from the input bucket
    #[strum(serialize = "storage_event")]
    StorageEvent,
}
