/// Classification for retry policy.
///
/// Used by the ingestion job runner to decide whether a failed fetch is worth
/// another attempt within the same cycle.
///
/// | Class | Retry in this cycle? |
/// |-------|----------------------|
/// | `Never` | No |
/// | `WithBackoff` | Yes, after an exponentially growing delay |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// Never retry - bad request, malformed payload, or terminal failure.
    Never,

    /// Transient failure (rate limit, timeout, upstream 5xx).
    WithBackoff,
}
