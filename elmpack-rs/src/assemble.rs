/// Separator placed between the assembled fragments.
pub const STATEMENT_SEPARATOR: &str = ";";

/// Concatenates the metadata snippet, the unwrapped bundle and the runtime
/// snippet, in that order, separated by `;`.
///
/// Later fragments reference bindings made by earlier ones, so the order is
/// fixed. Each fragment must already be syntactically self-terminating.
pub fn assemble(metadata: &str, unwrapped_bundle: &str, runtime: &str) -> String {
    [metadata, unwrapped_bundle, runtime].join(STATEMENT_SEPARATOR)
}
