use regex::Regex;
use reqwest::Method;
use tracing::{trace, warn};

use super::{
    error::{ClientError, Result},
    BeelineWebClient,
};
use crate::{
    account::{AccountSnapshot, DataPlan},
    constants::{
        BALANCE_FORM, BALANCE_PATTERN, BALANCE_PRICE_PATTERN, DATA_PLAN_FORM, DATA_PLAN_PATTERN,
        DEFAULT_REDIRECTS, INDEX_PATH, PARTIAL_AJAX_FORM, VIEW_STATE_FIELD,
    },
};

lazy_static::lazy_static! {
    static ref BALANCE_REGEX: Regex = Regex::new(BALANCE_PATTERN)
        .expect("Failed to compile balance regex");
    static ref BALANCE_PRICE_REGEX: Regex = Regex::new(BALANCE_PRICE_PATTERN)
        .expect("Failed to compile balance price regex");
    static ref DATA_PLAN_REGEX: Regex = Regex::new(DATA_PLAN_PATTERN)
        .expect("Failed to compile data plan regex");
}

impl BeelineWebClient {
    /// Get the account balance in rubles.
    pub async fn get_balance(&mut self) -> Result<f64> {
        let res = self.partial_render(&BALANCE_FORM).await?;
        extract_balance(&res)
    }

    /// Get the data allowance of the current package.
    pub async fn get_data_plan(&mut self) -> Result<DataPlan> {
        let res = self.partial_render(&DATA_PLAN_FORM).await?;
        extract_data_plan(&res)
    }

    /// Get the balance, then the data allowance.
    ///
    /// The data allowance is optional: a failure there is logged and the
    /// balance is still returned.
    pub async fn snapshot(&mut self) -> Result<AccountSnapshot> {
        let balance = self.get_balance().await?;
        let data_plan = match self.get_data_plan().await {
            Ok(data_plan) => Some(data_plan),
            Err(e) => {
                warn!("Could not get the data plan: {}", e);
                None
            }
        };

        Ok(AccountSnapshot { balance, data_plan })
    }

    /// Ask the account page to re-render one of its fragments.
    async fn partial_render(&mut self, fields: &[(&str, &str)]) -> Result<String> {
        let view_state = self
            .view_state
            .clone()
            .ok_or_else(|| ClientError::Authentication("not signed in".to_string()))?;

        let mut form: Vec<(&str, &str)> = fields.to_vec();
        form.extend_from_slice(&PARTIAL_AJAX_FORM);
        form.push((VIEW_STATE_FIELD, view_state.as_str()));

        self.request(Method::POST, INDEX_PATH, &form, DEFAULT_REDIRECTS)
            .await
    }
}

/// Extract the balance from the `homeBalance` fragment.
///
/// The amount is the text of the `price` span, e.g. `1 234,56`.
pub fn extract_balance(res: &str) -> Result<f64> {
    let block = BALANCE_REGEX
        .captures(res)
        .and_then(|c| c.name("block"))
        .ok_or_else(|| {
            trace!("{}", res);
            ClientError::Parse("balance block".to_string())
        })?
        .as_str();

    let amount = BALANCE_PRICE_REGEX
        .captures(block)
        .and_then(|c| c.name("amount"))
        .ok_or_else(|| {
            trace!("{}", block);
            ClientError::Parse("balance amount".to_string())
        })?
        .as_str();

    let amount = amount
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .replace(',', ".")
        .replace('−', "-");

    amount
        .parse::<f64>()
        .map_err(|_| ClientError::Parse(format!("balance from {:?}", amount)))
}

/// Extract the data allowance from the `bonusesForm` fragment.
///
/// The figures are the first two numbers of the `val` div, e.g. `12,5 / 30,0 ГБ`.
pub fn extract_data_plan(res: &str) -> Result<DataPlan> {
    let values = DATA_PLAN_REGEX
        .captures(res)
        .and_then(|c| c.name("values"))
        .ok_or_else(|| {
            trace!("{}", res);
            ClientError::Parse("data plan".to_string())
        })?
        .as_str()
        .replace('\u{a0}', " ")
        .replace(',', ".");

    let mut figures = values
        .split_whitespace()
        .filter(|token| token.starts_with(|c: char| c.is_ascii_digit()))
        .map(|token| {
            token
                .parse::<f64>()
                .map_err(|_| ClientError::Parse(format!("data plan figure from {:?}", token)))
        });

    let (Some(used), Some(total)) = (figures.next(), figures.next()) else {
        return Err(ClientError::Parse("data plan figures".to_string()));
    };

    Ok(DataPlan {
        used: used?,
        total: total?,
    })
}
