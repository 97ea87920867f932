//! Payments service.

use std::sync::Arc;

use async_trait::async_trait;
use eatsight::{
    orders::OrderStatus,
    payments::{PaymentOutcome, PaymentStatus, PaymentType, payment_deadline},
    pricing::{MAX_AMOUNT, round_money},
};
use jiff::Timestamp;
use mockall::automock;
use rust_decimal::Decimal;
use sqlx::{Postgres, Transaction};
use tracing::{Span, debug, info};

use crate::{
    database::Db,
    domain::{
        menu::repository::PgMenuRepository,
        orders::repositories::PgOrdersRepository,
        payments::{
            data::{NewPayment, NewPaymentMethod, PaymentVerification},
            errors::{PaymentValidationError, PaymentsServiceError},
            qr::{PaymentsConfig, PngQrCodeRenderer, QrCodeRenderer, store_png},
            records::{
                PaymentMethodRecord, PaymentRecord, PaymentStatusUpdate, PaymentUuid,
                QrCodeRecord, VerificationResult,
            },
            repositories::{
                PgPaymentMethodsRepository, PgPaymentsRepository, PgQrCodesRepository,
                PgVerificationsRepository, Settlement,
            },
        },
        users::records::UserUuid,
    },
};

#[derive(Clone)]
pub struct PgPaymentsService {
    db: Db,
    config: PaymentsConfig,
    renderer: Arc<dyn QrCodeRenderer>,
    payments: PgPaymentsRepository,
    payment_methods: PgPaymentMethodsRepository,
    qr_codes: PgQrCodesRepository,
    verifications: PgVerificationsRepository,
    orders: PgOrdersRepository,
    menu: PgMenuRepository,
}

impl std::fmt::Debug for PgPaymentsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgPaymentsService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl PgPaymentsService {
    #[must_use]
    pub fn new(db: Db, config: PaymentsConfig) -> Self {
        Self::with_renderer(db, config, Arc::new(PngQrCodeRenderer))
    }

    #[must_use]
    pub fn with_renderer(db: Db, config: PaymentsConfig, renderer: Arc<dyn QrCodeRenderer>) -> Self {
        Self {
            db,
            config,
            renderer,
            payments: PgPaymentsRepository::new(),
            payment_methods: PgPaymentMethodsRepository::new(),
            qr_codes: PgQrCodesRepository::new(),
            verifications: PgVerificationsRepository::new(),
            orders: PgOrdersRepository::new(),
            menu: PgMenuRepository::new(),
        }
    }

    async fn load_relations(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mut payment: PaymentRecord,
    ) -> Result<PaymentRecord, sqlx::Error> {
        payment.qr_code = self.qr_codes.find_qr_code(tx, payment.uuid).await?;
        payment.verification = self.verifications.find_verification(tx, payment.uuid).await?;

        Ok(payment)
    }

    async fn generate_qr_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        payment: &PaymentRecord,
    ) -> Result<QrCodeRecord, PaymentsServiceError> {
        let qr_data = self.config.payment_uri(payment.uuid);
        let path = self.config.qr_image_path(payment.uuid);

        let png = self.renderer.render_png(&qr_data)?;

        store_png(&path, &png).await?;

        debug!(path = %path.display(), bytes = png.len(), "stored QR image");

        let qr_code = self
            .qr_codes
            .create_qr_code(
                tx,
                payment.uuid,
                &qr_data,
                &path.to_string_lossy(),
                payment.payment_deadline,
            )
            .await?;

        Ok(qr_code)
    }
}

fn validate_payment_method(method: &NewPaymentMethod) -> Result<(), PaymentValidationError> {
    match method.kind {
        PaymentType::DebitCard | PaymentType::CreditCard => {
            let valid = method
                .card_number_last4
                .as_deref()
                .is_some_and(|digits| digits.len() == 4 && digits.bytes().all(|b| b.is_ascii_digit()));

            if valid {
                Ok(())
            } else {
                Err(PaymentValidationError::InvalidCardNumber)
            }
        }
        PaymentType::Qris | PaymentType::Cash => Ok(()),
    }
}

#[async_trait]
impl PaymentsService for PgPaymentsService {
    #[tracing::instrument(
        name = "payments.service.create_payment_method",
        skip(self, method),
        fields(user_uuid = %user, payment_method_uuid = %method.uuid, kind = %method.kind),
        err
    )]
    async fn create_payment_method(
        &self,
        user: UserUuid,
        method: NewPaymentMethod,
    ) -> Result<PaymentMethodRecord, PaymentsServiceError> {
        validate_payment_method(&method)?;

        let mut tx = self.db.begin().await?;

        let created = self
            .payment_methods
            .create_payment_method(&mut tx, user, &method)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn list_payment_methods(
        &self,
        user: UserUuid,
    ) -> Result<Vec<PaymentMethodRecord>, PaymentsServiceError> {
        let mut tx = self.db.begin().await?;

        let methods = self.payment_methods.list_payment_methods(&mut tx, user).await?;

        tx.commit().await?;

        Ok(methods)
    }

    #[tracing::instrument(
        name = "payments.service.create_payment",
        skip(self, payment),
        fields(
            user_uuid = %user,
            order_uuid = %payment.order,
            payment_uuid = %payment.uuid,
            payment_type = %payment.payment_type,
            amount = %payment.amount
        ),
        err
    )]
    async fn create_payment(
        &self,
        user: UserUuid,
        payment: NewPayment,
    ) -> Result<PaymentRecord, PaymentsServiceError> {
        let amount = round_money(payment.amount);

        if amount <= Decimal::ZERO {
            return Err(PaymentValidationError::NonPositiveAmount(payment.amount).into());
        }

        if amount > MAX_AMOUNT {
            return Err(PaymentValidationError::AmountTooLarge(payment.amount).into());
        }

        let mut tx = self.db.begin().await?;

        let order = self.orders.lock_order(&mut tx, payment.order, user).await?;

        if order.status != OrderStatus::InProgress {
            return Err(PaymentsServiceError::InvalidState(order.status));
        }

        if let Some(method) = payment.payment_method
            && self
                .payment_methods
                .find_payment_method(&mut tx, method, user)
                .await?
                .is_none()
        {
            return Err(PaymentValidationError::UnknownPaymentMethod(method).into());
        }

        let now = Timestamp::now();
        let deadline = payment_deadline(now).map_err(PaymentsServiceError::Deadline)?;

        let mut created = self
            .payments
            .create_payment(&mut tx, &payment, deadline, now)
            .await?;

        let table = match payment.payment_type {
            PaymentType::Qris => {
                created.qr_code = Some(self.generate_qr_code(&mut tx, &created).await?);

                None
            }
            PaymentType::DebitCard | PaymentType::CreditCard => None,
            PaymentType::Cash => {
                if let Some(table) = payment.table
                    && !self
                        .menu
                        .table_belongs_to_restaurant(&mut tx, table, order.restaurant_uuid)
                        .await?
                {
                    return Err(PaymentValidationError::UnknownTable(table).into());
                }

                payment.table.or(order.table_uuid)
            }
        };

        created.verification = Some(
            self.verifications
                .create_verification(
                    &mut tx,
                    created.uuid,
                    payment.payment_type.verification_type(),
                    table,
                )
                .await?,
        );

        tx.commit().await?;

        info!(deadline = %created.payment_deadline, "payment created");

        Ok(created)
    }

    async fn get_payment(
        &self,
        user: UserUuid,
        payment: PaymentUuid,
    ) -> Result<PaymentRecord, PaymentsServiceError> {
        let mut tx = self.db.begin().await?;

        let payment = self.payments.get_payment(&mut tx, payment, user).await?;
        let payment = self.load_relations(&mut tx, payment).await?;

        tx.commit().await?;

        Ok(payment)
    }

    async fn list_payments(
        &self,
        user: UserUuid,
        status: Option<PaymentStatus>,
    ) -> Result<Vec<PaymentRecord>, PaymentsServiceError> {
        let mut tx = self.db.begin().await?;

        let payments = self.payments.list_payments(&mut tx, user, status).await?;

        tx.commit().await?;

        Ok(payments)
    }

    #[tracing::instrument(
        name = "payments.service.verify_payment",
        skip(self, verification),
        fields(
            payment_uuid = %payment,
            outcome = ?verification.outcome,
            applied = tracing::field::Empty
        ),
        err
    )]
    async fn verify_payment(
        &self,
        payment: PaymentUuid,
        verification: PaymentVerification,
    ) -> Result<VerificationResult, PaymentsServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.payments.lock_payment(&mut tx, payment).await?;

        if !current.status.accepts_verification() {
            let unchanged = self.load_relations(&mut tx, current).await?;

            tx.commit().await?;

            Span::current().record("applied", false);

            debug!(status = %unchanged.status, "payment already settled");

            return Ok(VerificationResult {
                applied: false,
                payment: unchanged,
            });
        }

        let now = Timestamp::now();
        let status = verification.outcome.payment_status();

        let settlement = match verification.outcome {
            PaymentOutcome::Completed => Settlement {
                status,
                transaction_id: Some(current.payment_type.transaction_id(now)),
                payment_date: Some(now),
            },
            PaymentOutcome::Failed => Settlement {
                status,
                transaction_id: None,
                payment_date: None,
            },
        };

        let Some(settled) = self
            .payments
            .settle_payment(&mut tx, payment, settlement)
            .await?
        else {
            return Err(PaymentsServiceError::NotFound);
        };

        if status == PaymentStatus::Completed {
            let completed = self
                .orders
                .transition_status(
                    &mut tx,
                    settled.order_uuid,
                    None,
                    OrderStatus::InProgress,
                    OrderStatus::Completed,
                )
                .await?;

            if completed.is_some() {
                info!(order_uuid = %settled.order_uuid, "order completed");
            } else {
                debug!(order_uuid = %settled.order_uuid, "order was not in progress");
            }
        }

        self.verifications
            .settle_verification(
                &mut tx,
                payment,
                verification.outcome.verification_status(),
                verification.message.as_deref(),
                verification.cashier_name.as_deref(),
                now,
            )
            .await?;

        let settled = self.load_relations(&mut tx, settled).await?;

        tx.commit().await?;

        Span::current().record("applied", true);

        info!(
            status = %settled.status,
            transaction_id = settled.transaction_id.as_deref(),
            "payment verified"
        );

        Ok(VerificationResult {
            applied: true,
            payment: settled,
        })
    }

    async fn check_payment_status(
        &self,
        user: UserUuid,
        payment: PaymentUuid,
    ) -> Result<PaymentStatusUpdate, PaymentsServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.payments.get_payment(&mut tx, payment, user).await?;
        let verification = self.verifications.find_verification(&mut tx, payment).await?;

        tx.commit().await?;

        Ok(PaymentStatusUpdate {
            payment_uuid: current.uuid,
            status: current.status,
            verification_status: verification.as_ref().map(|v| v.verification_status),
            message: verification.and_then(|v| v.verification_message),
            checked_at: Timestamp::now(),
        })
    }

    #[tracing::instrument(
        name = "payments.service.download_qr_code",
        skip(self),
        fields(user_uuid = %user, payment_uuid = %payment),
        err
    )]
    async fn download_qr_code(
        &self,
        user: UserUuid,
        payment: PaymentUuid,
    ) -> Result<Option<QrCodeRecord>, PaymentsServiceError> {
        let mut tx = self.db.begin().await?;

        let qr_code = self.qr_codes.mark_downloaded(&mut tx, payment, user).await?;

        tx.commit().await?;

        if qr_code.is_none() {
            debug!("no downloadable QR code");
        }

        Ok(qr_code)
    }

    #[tracing::instrument(
        name = "payments.service.share_qr_code",
        skip(self),
        fields(user_uuid = %user, payment_uuid = %payment),
        err
    )]
    async fn share_qr_code(
        &self,
        user: UserUuid,
        payment: PaymentUuid,
    ) -> Result<bool, PaymentsServiceError> {
        let mut tx = self.db.begin().await?;

        let shared = self.qr_codes.mark_shared(&mut tx, payment, user).await?.is_some();

        tx.commit().await?;

        if !shared {
            debug!("no shareable QR code");
        }

        Ok(shared)
    }
}

#[automock]
#[async_trait]
pub trait PaymentsService: Send + Sync {
    /// Save a payment method. A new default replaces the previous one.
    async fn create_payment_method(
        &self,
        user: UserUuid,
        method: NewPaymentMethod,
    ) -> Result<PaymentMethodRecord, PaymentsServiceError>;

    /// The user's payment methods, default first.
    async fn list_payment_methods(
        &self,
        user: UserUuid,
    ) -> Result<Vec<PaymentMethodRecord>, PaymentsServiceError>;

    /// Open a pending payment against one of the user's in-progress orders.
    ///
    /// The payment, its verification record and, for QRIS, its QR code are created
    /// together. The deadline is eight minutes after creation.
    async fn create_payment(
        &self,
        user: UserUuid,
        payment: NewPayment,
    ) -> Result<PaymentRecord, PaymentsServiceError>;

    /// A payment with its QR code and verification record.
    async fn get_payment(
        &self,
        user: UserUuid,
        payment: PaymentUuid,
    ) -> Result<PaymentRecord, PaymentsServiceError>;

    /// The user's payments, newest first, without relations.
    async fn list_payments(
        &self,
        user: UserUuid,
        status: Option<PaymentStatus>,
    ) -> Result<Vec<PaymentRecord>, PaymentsServiceError>;

    /// Record the final outcome of a pending payment.
    ///
    /// A completed payment gets a transaction id and completes its order. Payments
    /// that already left `pending` are returned unchanged with `applied` unset.
    async fn verify_payment(
        &self,
        payment: PaymentUuid,
        verification: PaymentVerification,
    ) -> Result<VerificationResult, PaymentsServiceError>;

    /// Current status of one of the user's payments.
    async fn check_payment_status(
        &self,
        user: UserUuid,
        payment: PaymentUuid,
    ) -> Result<PaymentStatusUpdate, PaymentsServiceError>;

    /// Flag the QR code as downloaded and return it.
    ///
    /// `None` when the payment is not the user's, is not QRIS, or has no QR code.
    async fn download_qr_code(
        &self,
        user: UserUuid,
        payment: PaymentUuid,
    ) -> Result<Option<QrCodeRecord>, PaymentsServiceError>;

    /// Flag the QR code as shared. `false` under the same conditions as a failed download.
    async fn share_qr_code(
        &self,
        user: UserUuid,
        payment: PaymentUuid,
    ) -> Result<bool, PaymentsServiceError>;
}
