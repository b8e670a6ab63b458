/// One loader of an inline loader request such as `"css-loader?modules"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderRequest {
    pub loader: String,
    /// Inline options following `?`, kept as raw text.
    pub query: Option<String>,
}
