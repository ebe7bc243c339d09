mod author;
mod entry;
mod header;
mod kind;
mod markup;
mod post;
mod setting;

pub use self::author::Author;
pub use self::entry::Entry;
pub use self::header::{Header, Record};
pub use self::kind::{Kind, Scheme};
pub use self::markup::Markup;
pub use self::post::Post;
pub use self::setting::Setting;
