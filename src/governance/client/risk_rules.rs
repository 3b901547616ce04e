use super::GovernanceClient;
use crate::error::Error;
use crate::governance::ApiVersion;
use crate::models::RiskRule;

impl GovernanceClient {
    pub async fn create_risk_rule(&self, rule: &RiskRule) -> Result<RiskRule, Error> {
        let url = self.build_url(ApiVersion::V1, &["risk-rules"])?;
        let resp = self.send(self.http.post(url).json(rule)).await?;
        self.expect_json(resp).await
    }

    pub async fn get_risk_rule(&self, rule_id: &str) -> Result<RiskRule, Error> {
        let url = self.build_url(ApiVersion::V1, &["risk-rules", rule_id])?;
        let resp = self.send(self.http.get(url)).await?;
        self.expect_json(resp).await
    }

    /// Replaces a risk rule. The body must carry the same `id` as the path.
    pub async fn replace_risk_rule(&self, rule_id: &str, rule: &RiskRule) -> Result<RiskRule, Error> {
        if rule.id.as_deref() != Some(rule_id) {
            return Err(Error::validation(
                "id",
                format!("risk rule body id must match {rule_id:?}"),
            ));
        }
        let url = self.build_url(ApiVersion::V1, &["risk-rules", rule_id])?;
        let resp = self.send(self.http.put(url).json(rule)).await?;
        self.expect_json(resp).await
    }

    pub async fn delete_risk_rule(&self, rule_id: &str) -> Result<(), Error> {
        let url = self.build_url(ApiVersion::V1, &["risk-rules", rule_id])?;
        let resp = self.send(self.http.delete(url)).await?;
        self.expect_empty(resp).await
    }
}
