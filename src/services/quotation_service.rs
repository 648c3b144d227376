use chrono::Utc;

use crate::{
    audit::log_audit,
    dto::{
        cart::CartLine,
        quotations::{BookingConfirmed, CreateQuotationRequest, UpdateQuotationRequest},
    },
    error::{AppError, AppResult},
    models::{Quotation, QuotationStatus},
    pricing::{CartTotals, LineItem, SUBMISSION_FEE_RATE},
    response::{ApiResponse, Meta},
    state::AppState,
};

fn validate_lines(lines: &[CartLine]) -> AppResult<Vec<LineItem>> {
    if lines.is_empty() {
        return Err(AppError::BadRequest("cart is empty".to_string()));
    }
    let mut items = Vec::with_capacity(lines.len());
    for line in lines {
        if line.quantity <= 0 {
            return Err(AppError::BadRequest(
                "cart has a zero-quantity line".to_string(),
            ));
        }
        items.push(LineItem {
            price: line.price.max(0.0),
            quantity: line.quantity,
            discount: line.discount.clamp(0.0, 100.0),
        });
    }
    Ok(items)
}

fn validate_customer(name: &str, phone: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::BadRequest("customer_name is required".to_string()));
    }
    if phone.trim().is_empty() {
        return Err(AppError::BadRequest(
            "customer_phone is required".to_string(),
        ));
    }
    Ok(())
}

pub async fn create_quotation(
    state: &AppState,
    payload: CreateQuotationRequest,
) -> AppResult<ApiResponse<Quotation>> {
    validate_customer(&payload.customer_name, &payload.customer_phone)?;
    let items = validate_lines(&payload.items)?;
    let additional = payload
        .additional_discount
        .unwrap_or(0.0)
        .clamp(0.0, 100.0);

    // Submission payloads persist the 3% processing fee.
    let totals = CartTotals::compute(&items, additional, SUBMISSION_FEE_RATE);
    let quote_no = format!("QUO-{}", Utc::now().timestamp_millis());
    let lines = serde_json::to_value(&payload.items)
        .map_err(|err| AppError::Internal(err.into()))?;

    let quotation = sqlx::query_as::<_, Quotation>(
        r#"
        INSERT INTO quotations
            (quote_no, customer_name, customer_phone, customer_email, lines,
             additional_discount, net_rate, you_save, subtotal,
             discounted_subtotal, processing_fee, total)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING *
        "#,
    )
    .bind(&quote_no)
    .bind(payload.customer_name.trim())
    .bind(payload.customer_phone.trim())
    .bind(payload.customer_email.as_deref())
    .bind(lines)
    .bind(additional)
    .bind(totals.net_rate)
    .bind(totals.you_save)
    .bind(totals.subtotal)
    .bind(totals.discounted_subtotal)
    .bind(totals.processing_fee)
    .bind(totals.total)
    .fetch_one(&state.pool)
    .await?;

    if let Err(err) = log_audit(
        &state.pool,
        "quotation_create",
        Some("quotations"),
        Some(serde_json::json!({ "quote_no": quote_no })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Quotation created",
        quotation,
        Some(Meta::empty()),
    ))
}

pub async fn get_quotation(state: &AppState, quote_no: &str) -> AppResult<ApiResponse<Quotation>> {
    let quotation = fetch_quotation(state, quote_no).await?;
    Ok(ApiResponse::success("Quotation", quotation, None))
}

/// Edits are only allowed while the quotation is still pending. Totals are
/// recomputed whenever the lines or the additional discount change.
pub async fn update_quotation(
    state: &AppState,
    quote_no: &str,
    payload: UpdateQuotationRequest,
) -> AppResult<ApiResponse<Quotation>> {
    let existing = fetch_quotation(state, quote_no).await?;
    ensure_pending(&existing)?;

    let customer_name = payload.customer_name.unwrap_or(existing.customer_name);
    let customer_phone = payload.customer_phone.unwrap_or(existing.customer_phone);
    let customer_email = payload.customer_email.or(existing.customer_email);
    validate_customer(&customer_name, &customer_phone)?;

    let additional = payload
        .additional_discount
        .unwrap_or(existing.additional_discount)
        .clamp(0.0, 100.0);

    let (lines, items) = match payload.items {
        Some(new_lines) => {
            let items = validate_lines(&new_lines)?;
            let value = serde_json::to_value(&new_lines)
                .map_err(|err| AppError::Internal(err.into()))?;
            (value, items)
        }
        None => {
            let stored: Vec<CartLine> = serde_json::from_value(existing.lines.clone())
                .map_err(|err| AppError::Internal(err.into()))?;
            let items = validate_lines(&stored)?;
            (existing.lines, items)
        }
    };

    let totals = CartTotals::compute(&items, additional, SUBMISSION_FEE_RATE);

    // The status guard closes the race with a concurrent book/cancel; a
    // transition landing after the pending check above leaves zero rows here.
    let quotation = sqlx::query_as::<_, Quotation>(
        r#"
        UPDATE quotations
        SET customer_name = $2, customer_phone = $3, customer_email = $4,
            lines = $5, additional_discount = $6, net_rate = $7, you_save = $8,
            subtotal = $9, discounted_subtotal = $10, processing_fee = $11,
            total = $12, updated_at = now()
        WHERE quote_no = $1 AND status = 'pending'
        RETURNING *
        "#,
    )
    .bind(quote_no)
    .bind(&customer_name)
    .bind(&customer_phone)
    .bind(customer_email.as_deref())
    .bind(lines)
    .bind(additional)
    .bind(totals.net_rate)
    .bind(totals.you_save)
    .bind(totals.subtotal)
    .bind(totals.discounted_subtotal)
    .bind(totals.processing_fee)
    .bind(totals.total)
    .fetch_optional(&state.pool)
    .await?;

    let quotation = match quotation {
        Some(q) => q,
        None => return Err(not_pending()),
    };

    Ok(ApiResponse::success(
        "Quotation updated",
        quotation,
        Some(Meta::empty()),
    ))
}

/// `pending -> booked`; assigns the order reference. The transition is a
/// single guarded update, so only one caller can ever win it.
pub async fn book_quotation(
    state: &AppState,
    quote_no: &str,
) -> AppResult<ApiResponse<BookingConfirmed>> {
    let order_no = format!("ORD-{}", Utc::now().timestamp_millis());
    let result = sqlx::query(
        r#"
        UPDATE quotations
        SET status = 'booked', order_no = $2, updated_at = now()
        WHERE quote_no = $1 AND status = 'pending'
        "#,
    )
    .bind(quote_no)
    .bind(&order_no)
    .execute(&state.pool)
    .await?;

    if result.rows_affected() == 0 {
        // Missing quotation is a 404; an already-transitioned one is a 400.
        fetch_quotation(state, quote_no).await?;
        return Err(not_pending());
    }

    if let Err(err) = log_audit(
        &state.pool,
        "quotation_book",
        Some("quotations"),
        Some(serde_json::json!({ "quote_no": quote_no, "order_no": order_no })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Quotation booked",
        BookingConfirmed { order_no },
        Some(Meta::empty()),
    ))
}

/// `pending -> cancelled`, terminal.
pub async fn cancel_quotation(
    state: &AppState,
    quote_no: &str,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = sqlx::query(
        r#"
        UPDATE quotations
        SET status = 'cancelled', updated_at = now()
        WHERE quote_no = $1 AND status = 'pending'
        "#,
    )
    .bind(quote_no)
    .execute(&state.pool)
    .await?;

    if result.rows_affected() == 0 {
        fetch_quotation(state, quote_no).await?;
        return Err(not_pending());
    }

    Ok(ApiResponse::success(
        "Quotation cancelled",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

async fn fetch_quotation(state: &AppState, quote_no: &str) -> AppResult<Quotation> {
    let quotation =
        sqlx::query_as::<_, Quotation>("SELECT * FROM quotations WHERE quote_no = $1")
            .bind(quote_no)
            .fetch_optional(&state.pool)
            .await?;
    match quotation {
        Some(q) => Ok(q),
        None => Err(AppError::NotFound),
    }
}

fn ensure_pending(quotation: &Quotation) -> AppResult<()> {
    if quotation.status != QuotationStatus::Pending {
        return Err(not_pending());
    }
    Ok(())
}

fn not_pending() -> AppError {
    AppError::BadRequest("quotation is no longer pending".to_string())
}
