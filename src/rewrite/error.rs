use thiserror::Error;

use crate::base::DescriptorError;
use crate::resolve::ResolveError;

/// A module that could not be rewritten. The module is left as it was.
#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("Malformed descriptor in class `{class}` ({context}): {source}")]
    Descriptor {
        class: String,
        context: String,
        #[source]
        source: DescriptorError,
    },

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}
