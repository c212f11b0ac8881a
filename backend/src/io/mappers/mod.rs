pub mod preview_mapper;
pub mod split_record_mapper;

pub use preview_mapper::PreviewMapper;
pub use split_record_mapper::SplitRecordMapper;
