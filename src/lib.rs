pub mod error;
pub mod metadata;
pub mod parser;
pub mod record;
pub mod reserved;
pub mod types;

pub use error::{Error, Result};
pub use metadata::{
    FieldMetadata, HeaderMetadata, IdentifiedMetadata, Metadata, MetadataRecord, RawMetadata,
};
pub use parser::{parse_data_line, parse_header_line, split_property};
pub use record::{PositionRecord, SampleRecord};
pub use reserved::{ReservedFormatProperty, ReservedInfoProperty, ReservedProperty};
pub use types::{
    convert_list, convert_property, convert_scalar, Number, PropertyType, PropertyValue, TypedValue,
};
