use crate::models::LeadProfile;

/// Build the relevancy-scoring prompt for one lead
///
/// The product text and lead fields are interpolated verbatim; the model is
/// trusted to ignore adversarial content in either.
pub fn build_relevancy_prompt(product_details: &str, lead: &LeadProfile) -> String {
    format!(
        "Analyze the relevancy of the following product for this LinkedIn lead. \
Consider the company they work for (use your knowledge base to analyse the company \
and whether it is a good fit for the product), their experience and background.\n\
\n\
Product Details:\n\
```{product_details}```\n\
\n\
Lead Information:\n\
```\n\
Name: {name}\n\
Experience: {experience}\n\
Education: {education}\n\
Company: {company}\n\
Company Overview: {company_overview}\n\
Company Industry: {company_industry}\n\
```\n\
\n\
Evaluate the match between the product and the lead's profile. Consider:\n\
1. How well the product aligns with their current role and responsibilities\n\
2. Whether their skills and experience make them a good fit for this product\n\
3. If their industry/domain matches the product's target market\n\
4. Their level of seniority and decision-making authority (if they are a new employee \
or intern, they may not be the decision-maker. Keep the score low for them)\n\
\n\
Return ONLY a single number between 0 and 10 (with one decimal place) representing \
the relevancy score, where:\n\
- 0-3: Poor match\n\
- 4-6: Moderate match\n\
- 7-8: Good match\n\
- 9-10: Excellent match\n\
\n\
Example response: 7.5",
        product_details = product_details,
        name = lead.name,
        experience = lead.experience,
        education = lead.education,
        company = lead.company,
        company_overview = lead.company_overview,
        company_industry = lead.company_industry,
    )
}
