pub mod storage_event;
