/// Produces the content of a synthetic reply
pub trait ReplySource: Send + Sync {
    fn generate(&self) -> String;
}
