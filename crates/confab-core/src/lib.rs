pub mod meeting_type;
pub mod record;
pub mod transcript;

pub use record::*;
pub use transcript::*;

pub use meeting_type::MeetingType;
