/// Asks the user before a destructive operation.
///
/// Any `Fn(&str) -> bool` works, which keeps deletion testable without a
/// terminal:
///
/// ```
/// use tubeshelf::store::Confirm;
///
/// let decline = |_: &str| false;
/// assert!(!decline.confirm("Really delete video 'abc123'?"));
/// ```
pub trait Confirm {
    /// Show `prompt` and return whether the user agreed.
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Accepts every prompt without asking (`--yes`).
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, prompt: &str) -> bool {
        tracing::debug!(prompt = %prompt, "Confirmation assumed");
        true
    }
}
