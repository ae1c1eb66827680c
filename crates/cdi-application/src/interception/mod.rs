//! Method Interception
//!
//! | Type | Role |
//! |------|------|
//! | [`Interceptor`] | One cross-cutting step |
//! | [`InterceptorChain`] | Ordered interceptors of a target type |
//! | [`InvocationContext`] | Cursor over the chain for one call |
//! | [`Proxy`] | Builds a context per call and executes it |
//! | [`Arguments`] | JSON-encoded positional arguments |

pub mod arguments;
pub mod context;
pub mod interceptor;
pub mod proxy;

pub use arguments::Arguments;
pub use context::{InvocationContext, InvocationState, RealMethod};
pub use interceptor::{Interceptor, InterceptorChain};
pub use proxy::Proxy;
