//! # Concrete Commands
//!
//! The storage commands carried over the message bus, grouped by what they
//! operate on.
//!
//! | Command | Reply | Bucket-info capable |
//! |---------|-------|---------------------|
//! | `PutCommand` | `PutReply` | yes |
//! | `GetCommand` | `GetReply` | yes |
//! | `RemoveCommand` | `RemoveReply` | yes |
//! | `CreateBucketCommand` | `CreateBucketReply` | yes |
//! | `RequestBucketInfoCommand` | `RequestBucketInfoReply` | no |

mod bucket;
mod document;

pub use bucket::{
    BucketInfoEntry, CreateBucketCommand, CreateBucketReply, RequestBucketInfoCommand,
    RequestBucketInfoReply,
};
pub use document::{GetCommand, GetReply, PutCommand, PutReply, RemoveCommand, RemoveReply};
