use serde::{Deserialize, Serialize};
use unify_normalize::{CodeForm, DateForm};

/// Output forms used by the identifier and temporal rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnifyOptions {
    #[serde(default)]
    pub date_form: DateForm,
    #[serde(default)]
    pub code_form: CodeForm,
}

impl UnifyOptions {
    pub fn with_date_form(mut self, date_form: DateForm) -> Self {
        self.date_form = date_form;
        self
    }

    pub fn with_code_form(mut self, code_form: CodeForm) -> Self {
        self.code_form = code_form;
        self
    }
}
