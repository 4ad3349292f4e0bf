use uuid::Uuid;

use super::{FormError, Validate};
use crate::{CreatePlanRequest, Plan};

/// Minimum number of non-blank feature rows a plan needs
pub const MIN_PLAN_DETAILS: usize = 3;

/// One editable feature row. The id only keys the row in the UI and is not
/// sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanDetail {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanFormData {
    pub name: String,
    pub monthly_price: String,
    pub yearly_price: String,
    pub details: Vec<PlanDetail>,
}

impl PlanFormData {
    /// Prefill the form for editing an existing plan
    pub fn from_plan(plan: &Plan) -> Self {
        let mut form = Self {
            name: plan.name.clone(),
            monthly_price: plan.monthly_price.to_string(),
            yearly_price: plan.yearly_price.to_string(),
            details: Vec::with_capacity(plan.details.len()),
        };
        for text in &plan.details {
            form.add_detail(text.clone());
        }
        form
    }

    /// Append a feature row and return its generated id
    pub fn add_detail(&mut self, text: impl Into<String>) -> String {
        let id = Uuid::new_v4().to_string();
        self.details.push(PlanDetail {
            id: id.clone(),
            text: text.into(),
        });
        id
    }

    pub fn update_detail(&mut self, id: &str, text: impl Into<String>) -> bool {
        match self.details.iter_mut().find(|detail| detail.id == id) {
            Some(detail) => {
                detail.text = text.into();
                true
            }
            None => false,
        }
    }

    pub fn remove_detail(&mut self, id: &str) -> bool {
        let before = self.details.len();
        self.details.retain(|detail| detail.id != id);
        self.details.len() != before
    }

    fn filled_details(&self) -> Vec<String> {
        self.details
            .iter()
            .map(|detail| detail.text.trim())
            .filter(|text| !text.is_empty())
            .map(str::to_string)
            .collect()
    }
}

fn parse_price(input: &str) -> Option<f64> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    input.parse::<f64>().ok().filter(|price| price.is_finite() && *price >= 0.0)
}

impl Validate for PlanFormData {
    type Payload = CreatePlanRequest;

    fn validate(&self) -> Result<CreatePlanRequest, FormError> {
        // The feature count gates submission before any field rule runs.
        let details = self.filled_details();
        if details.len() < MIN_PLAN_DETAILS {
            return Err(FormError::TooFewDetails { required: MIN_PLAN_DETAILS });
        }

        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingPlanName);
        }
        let monthly_price = parse_price(&self.monthly_price).ok_or(FormError::InvalidMonthlyPrice)?;
        let yearly_price = parse_price(&self.yearly_price).ok_or(FormError::InvalidYearlyPrice)?;

        Ok(CreatePlanRequest {
            name: name.to_string(),
            monthly_price,
            yearly_price,
            details,
        })
    }
}
