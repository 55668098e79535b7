//! Products module of the business-management client.
//!
//! Packaging normalization and validation for the product form, the numeric
//! input adapter feeding it, and the form session that gates saves to the
//! remote backend. Everything except [`ProductForm::save`] is pure.

pub mod form;
pub mod numeric;
pub mod packaging;
pub mod store;

pub use form::{
    FieldError, FormTab, ProductDetails, ProductForm, ProductFormData, ProductPayload,
    normalize_product_payload,
};
pub use numeric::{NumInput, NumericField, coerce, format, parse_cents, parse_decimal, parse_display};
pub use packaging::{
    Dimension, MissingDimension, PackagingInput, PackagingPayload, PackagingType, normalize,
    validate, violations,
};
pub use store::{InMemoryProductStore, ProductStore, SaveError, StoreError};
