/// Cross-case state threaded through one suite run
#[derive(Debug, Clone)]
pub struct SuiteContext {
    /// Endpoint root shown in output and reports
    pub endpoint: String,

    /// Identifier assigned by the product create case, if it passed.
    /// Update and delete only run when this is set.
    pub created_product: Option<String>,
}

impl SuiteContext {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            created_product: None,
        }
    }

    pub fn set_created_product(&mut self, id: String) {
        self.created_product = Some(id);
    }
}
