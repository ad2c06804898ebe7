use std::time::Instant;
use tokio::task::JoinHandle;
use uuid::Uuid;

use super::context::SuiteContext;
use super::events::{ConsoleEventListener, EventEmitter, SuiteEvent};
use super::state::{ResultsLog, SkippedCase, Summary, TestResult};
use crate::cases::{
    analytics, auth, bundles, cash, cors, errors, orders, placeholder, pricing, products, shop,
    voice, CaseResult,
};
use crate::client::ApiClient;
use crate::report::types::TestResults;

/// Runs the fixed case catalogue against one backend, strictly in order
pub struct SuiteExecutor {
    client: ApiClient,
    context: SuiteContext,
    log: ResultsLog,
    skipped: Vec<SkippedCase>,
    emitter: EventEmitter,
    listener: Option<JoinHandle<()>>,
    session_id: String,
}

impl SuiteExecutor {
    /// Must be called inside a tokio runtime when `console` is set
    pub fn new(client: ApiClient, console: bool) -> Self {
        let (emitter, receiver) = EventEmitter::new();
        let context = SuiteContext::new(&client.endpoint());

        let listener = if console {
            Some(tokio::spawn(ConsoleEventListener::listen(receiver)))
        } else {
            None
        };

        Self {
            client,
            context,
            log: ResultsLog::new(),
            skipped: Vec::new(),
            emitter,
            listener,
            session_id: Uuid::new_v4().to_string(),
        }
    }

    pub fn results(&self) -> &[TestResult] {
        self.log.results()
    }

    pub fn skipped(&self) -> &[SkippedCase] {
        &self.skipped
    }

    pub fn summary(&self) -> Summary {
        self.log.summary()
    }

    pub fn context(&self) -> &SuiteContext {
        &self.context
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Run every case, print the summary and report whether all recorded
    /// cases passed. Console output is complete when this returns.
    pub async fn run_all_tests(&mut self) -> bool {
        self.emitter.emit(SuiteEvent::SessionStarted {
            session_id: self.session_id.clone(),
            endpoint: self.context.endpoint.clone(),
        });

        self.test_authentication().await;
        self.test_shop_data().await;
        self.test_products().await;
        self.test_orders().await;
        self.test_analytics().await;
        self.test_dynamic_pricing().await;
        self.test_voice_parsing().await;
        self.test_festival_bundles().await;
        self.test_cash_session().await;
        self.test_placeholder_images().await;
        self.test_cors_headers().await;
        self.test_error_handling().await;

        self.emitter.emit(SuiteEvent::SessionFinished {
            summary: self.log.summary(),
            skipped: self.skipped.clone(),
        });
        self.emitter.close();
        if let Some(listener) = self.listener.take() {
            let _ = listener.await;
        }

        self.log.all_passed()
    }

    /// Package the finished run for the report writers
    pub fn into_report(self) -> TestResults {
        TestResults::new(
            &self.session_id,
            &self.context.endpoint,
            self.log.into_results(),
            self.skipped,
        )
    }

    async fn test_authentication(&mut self) {
        self.group("🔐", "Testing Authentication...");

        let started = self.begin(auth::OWNER_LOGIN);
        let outcome = auth::owner_login(&self.client).await;
        self.record(auth::OWNER_LOGIN, started, outcome);

        let started = self.begin(auth::STAFF_LOGIN);
        let outcome = auth::staff_login(&self.client).await;
        self.record(auth::STAFF_LOGIN, started, outcome);
    }

    async fn test_shop_data(&mut self) {
        self.group("🏪", "Testing Shop Data...");

        let started = self.begin(shop::DEMO_SHOP);
        let outcome = shop::demo_shop(&self.client).await;
        self.record(shop::DEMO_SHOP, started, outcome);
    }

    async fn test_products(&mut self) {
        self.group("📦", "Testing Products API...");

        let started = self.begin(products::LIST);
        let outcome = products::list(&self.client).await;
        self.record(products::LIST, started, outcome);

        let started = self.begin(products::CREATE);
        match products::create(&self.client).await {
            Ok((verdict, id)) => {
                self.record(products::CREATE, started, Ok(verdict));
                self.context.set_created_product(id);
            }
            Err(failure) => {
                self.record(products::CREATE, started, Err(failure));
            }
        }

        let Some(product_id) = self.context.created_product.clone() else {
            let reason = "create yielded no product id";
            self.skip(products::UPDATE, reason);
            self.skip(products::DELETE, reason);
            return;
        };

        let started = self.begin(products::UPDATE);
        let outcome = products::update(&self.client, &product_id).await;
        self.record(products::UPDATE, started, outcome);

        let started = self.begin(products::DELETE);
        let outcome = products::delete(&self.client, &product_id).await;
        self.record(products::DELETE, started, outcome);
    }

    async fn test_orders(&mut self) {
        self.group("📋", "Testing Orders API...");

        let started = self.begin(orders::LIST);
        let outcome = orders::list(&self.client).await;
        self.record(orders::LIST, started, outcome);

        let started = self.begin(orders::CREATE);
        let outcome = orders::create(&self.client).await;
        self.record(orders::CREATE, started, outcome);
    }

    async fn test_analytics(&mut self) {
        self.group("📊", "Testing Analytics API...");

        let started = self.begin(analytics::DASHBOARD);
        let outcome = analytics::dashboard(&self.client).await;
        self.record(analytics::DASHBOARD, started, outcome);
    }

    async fn test_dynamic_pricing(&mut self) {
        self.group("💰", "Testing Dynamic Pricing...");

        let started = self.begin(pricing::SUGGEST);
        let outcome = pricing::suggest(&self.client).await;
        self.record(pricing::SUGGEST, started, outcome);

        let started = self.begin(pricing::INVALID_PRODUCT);
        let outcome = pricing::invalid_product(&self.client).await;
        self.record(pricing::INVALID_PRODUCT, started, outcome);
    }

    async fn test_voice_parsing(&mut self) {
        self.group("🎤", "Testing Voice Parsing...");

        let started = self.begin(voice::ADD_PRODUCT);
        let outcome = voice::add_product(&self.client).await;
        self.record(voice::ADD_PRODUCT, started, outcome);
    }

    async fn test_festival_bundles(&mut self) {
        self.group("🎉", "Testing Festival Bundles...");

        for festival in bundles::FESTIVALS {
            let name = bundles::case_name(festival);
            let started = self.begin(&name);
            let outcome = bundles::festival(&self.client, festival).await;
            self.record(&name, started, outcome);
        }

        let started = self.begin(bundles::INVALID_FESTIVAL);
        let outcome = bundles::invalid_festival(&self.client).await;
        self.record(bundles::INVALID_FESTIVAL, started, outcome);
    }

    async fn test_cash_session(&mut self) {
        self.group("💵", "Testing Cash Session...");

        let started = self.begin(cash::SESSION);
        let outcome = cash::session(&self.client).await;
        self.record(cash::SESSION, started, outcome);
    }

    async fn test_placeholder_images(&mut self) {
        self.group("🖼️", "Testing Placeholder Images...");

        let started = self.begin(placeholder::SVG_200);
        let outcome = placeholder::svg_200(&self.client).await;
        self.record(placeholder::SVG_200, started, outcome);
    }

    async fn test_cors_headers(&mut self) {
        self.group("🌐", "Testing CORS Headers...");

        let started = self.begin(cors::PREFLIGHT);
        let outcome = cors::preflight(&self.client).await;
        self.record(cors::PREFLIGHT, started, outcome);
    }

    async fn test_error_handling(&mut self) {
        self.group("⚠️", "Testing Error Handling...");

        let started = self.begin(errors::NOT_FOUND);
        let outcome = errors::unknown_endpoint(&self.client).await;
        self.record(errors::NOT_FOUND, started, outcome);
    }

    fn group(&self, icon: &str, title: &str) {
        self.emitter.emit(SuiteEvent::GroupStarted {
            icon: icon.to_string(),
            title: title.to_string(),
        });
    }

    fn begin(&self, name: &str) -> Instant {
        self.emitter.emit(SuiteEvent::CaseStarted {
            name: name.to_string(),
        });
        Instant::now()
    }

    /// Append exactly one result for the case and announce it
    fn record(&mut self, name: &str, started: Instant, outcome: CaseResult) {
        let duration_ms = started.elapsed().as_millis() as u64;

        if let Err(failure) = &outcome {
            if failure.is_fault() {
                log::warn!("{}: {}", name, failure);
            } else {
                log::debug!("{}: {}", name, failure);
            }
        }

        let result = TestResult::from_outcome(name, outcome, duration_ms);
        let event = if result.passed {
            SuiteEvent::CasePassed {
                name: result.name.clone(),
                details: result.details.clone(),
                duration_ms,
            }
        } else {
            SuiteEvent::CaseFailed {
                name: result.name.clone(),
                details: result.details.clone(),
                duration_ms,
            }
        };
        self.log.append(result);
        self.emitter.emit(event);
    }

    fn skip(&mut self, name: &str, reason: &str) {
        self.skipped.push(SkippedCase {
            name: name.to_string(),
            reason: reason.to_string(),
        });
        self.emitter.emit(SuiteEvent::CaseSkipped {
            name: name.to_string(),
            reason: reason.to_string(),
        });
    }
}
