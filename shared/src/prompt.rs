//! Prompt construction for the gift backend.

use crate::models::{BudgetTable, GiftPreferences, GIFT_COUNT};

/// Build the generation prompt for a set of preferences.
///
/// Pure and deterministic: the same preferences always yield the same text.
pub fn build_prompt(prefs: &GiftPreferences, budgets: &BudgetTable) -> String {
    let interests = if prefs.interests.is_empty() {
        "open".to_string()
    } else {
        prefs.interests.join(", ")
    };

    format!(
        r#"
You are GiftGenie, an India-first gifting expert.
Return ONLY valid JSON (no markdown) in this exact schema:

{{
  "gifts": [
    {{
      "title": "string",
      "price_range_inr": "string",
      "why": "string",
      "buy_query": "string",
      "delivery_fit": "online|offline|either"
    }}
  ]
}}

User inputs:
- Delivery preference: {delivery}
- Occasion: {occasion}
- Recipient: {recipient}
- Gender (soft preference, avoid stereotypes): {gender}
- Interests (comma separated): {interests}
- Budget: {budget}
- Vibe: {vibe}

Rules:
- Give exactly {count} gift ideas.
- Stay within the stated budget range.
- Make ideas specific and not generic.
- If vibe is "handmade", ensure at least 3 handmade/personalized ideas.
- If delivery preference is online, bias to items easy to order online in India.
- If offline, include locally-buyable ideas (experiences, artisan markets, bookstores, cafes).
- Avoid anything inappropriate, illegal, or adult content.
- Output must be valid JSON only.
"#,
        delivery = prefs.delivery,
        occasion = prefs.occasion,
        recipient = prefs.recipient,
        gender = prefs.gender,
        interests = interests,
        budget = budgets.label(prefs.budget.as_deref()),
        vibe = prefs.vibe,
        count = GIFT_COUNT,
    )
}
