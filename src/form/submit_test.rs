use super::*;
use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;

use tokio::sync::Notify;

use crate::form::catalog::CuisineCatalog;
use crate::form::encode::SubmissionPayload;
use crate::form::path::FieldPath;
use crate::form::types::{MenuItem, Restaurant};

// =========================================================================
// Mocks
// =========================================================================

#[derive(Default)]
struct MockTransport {
    creates: AtomicUsize,
    updates: AtomicUsize,
    payloads: Mutex<Vec<SubmissionPayload>>,
    fail_with: Option<TransportError>,
    hold: Option<Notify>,
}

impl MockTransport {
    fn failing(error: TransportError) -> Self {
        Self { fail_with: Some(error), ..Self::default() }
    }

    fn holding() -> Self {
        Self { hold: Some(Notify::new()), ..Self::default() }
    }

    fn calls(&self) -> usize {
        self.creates.load(Ordering::SeqCst) + self.updates.load(Ordering::SeqCst)
    }

    async fn reply(&self, payload: SubmissionPayload, message: &str) -> Result<TransportReply, TransportError> {
        self.payloads.lock().unwrap().push(payload);
        if let Some(hold) = &self.hold {
            hold.notified().await;
        }
        match &self.fail_with {
            Some(error) => Err(error.clone()),
            None => Ok(TransportReply { message: message.to_owned() }),
        }
    }
}

#[async_trait::async_trait]
impl RestaurantTransport for MockTransport {
    async fn submit_create(&self, payload: SubmissionPayload) -> Result<TransportReply, TransportError> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.reply(payload, "Restaurant created").await
    }

    async fn submit_update(&self, payload: SubmissionPayload) -> Result<TransportReply, TransportError> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.reply(payload, "Restaurant updated").await
    }
}

#[derive(Default)]
struct RecordingNotifier {
    successes: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.successes.lock().unwrap().push(message.to_owned());
    }

    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_owned());
    }
}

fn orchestrator(transport: &Arc<MockTransport>, notifier: &Arc<RecordingNotifier>) -> SubmissionOrchestrator {
    SubmissionOrchestrator::new(transport.clone(), notifier.clone())
}

fn filled_form() -> RestaurantForm {
    let mut form = RestaurantForm::create(CuisineCatalog::default());
    form.set(FieldPath::Name, "Taco Town").unwrap();
    form.set(FieldPath::City, "Austin").unwrap();
    form.set(FieldPath::Country, "USA").unwrap();
    form.set(FieldPath::DeliveryPrice, "5").unwrap();
    form.set(FieldPath::EstimatedDeliveryTime, "30").unwrap();
    form.toggle_cuisine("Mexican").unwrap();
    form.set(FieldPath::menu_item_name(0), "Burger").unwrap();
    form.set(FieldPath::menu_item_price(0), "8.5").unwrap();
    form
}

fn existing_restaurant() -> Restaurant {
    Restaurant {
        id: "r1".to_owned(),
        user: None,
        name: "Pasta Place".to_owned(),
        city: "Rome".to_owned(),
        country: "Italy".to_owned(),
        delivery_price: 1050,
        estimated_delivery_time: 25,
        cuisines: vec!["Italian".to_owned()],
        menu_items: vec![MenuItem { id: None, name: "Carbonara".to_owned(), price: 1299 }],
        image_url: None,
        last_updated: None,
    }
}

// =========================================================================
// Mode and labels
// =========================================================================

#[test]
fn submit_mode_labels_match_buttons() {
    assert_eq!(SubmitMode::Create.label(), "Create");
    assert_eq!(SubmitMode::Update.label(), "Update");
}

#[test]
fn idle_orchestrator_labels_by_form_mode() {
    let transport = Arc::new(MockTransport::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let orch = orchestrator(&transport, &notifier);
    assert_eq!(orch.status(), SubmitStatus::Idle);
    assert!(!orch.controls_disabled());
    assert_eq!(orch.submit_label(&filled_form()), "Create");
    let edit = RestaurantForm::edit(CuisineCatalog::default(), &existing_restaurant());
    assert_eq!(orch.submit_label(&edit), "Update");
}

// =========================================================================
// Validation gate
// =========================================================================

#[tokio::test]
async fn invalid_form_never_reaches_transport() {
    let transport = Arc::new(MockTransport::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let orch = orchestrator(&transport, &notifier);

    let mut form = filled_form();
    form.toggle_cuisine("Mexican").unwrap();
    form.remove_menu_item(0).unwrap();

    let outcome = orch.submit(&mut form).await;
    let SubmitOutcome::Invalid(errors) = outcome else {
        panic!("expected validation failure, got {outcome:?}");
    };
    assert!(errors.contains(FieldPath::Cuisines));
    assert!(errors.contains(FieldPath::MenuItems));
    assert_eq!(form.errors(), &errors);
    assert_eq!(transport.calls(), 0);
    assert_eq!(orch.status(), SubmitStatus::Idle);
    assert!(notifier.successes.lock().unwrap().is_empty());
    assert!(notifier.errors.lock().unwrap().is_empty());
}

// =========================================================================
// Create / update
// =========================================================================

#[tokio::test]
async fn create_mode_sends_wire_units_and_notifies_success() {
    let transport = Arc::new(MockTransport::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let orch = orchestrator(&transport, &notifier);

    let mut form = filled_form();
    let outcome = orch.submit(&mut form).await;

    assert_eq!(
        outcome,
        SubmitOutcome::Sent {
            mode: SubmitMode::Create,
            reply: TransportReply { message: "Restaurant created".to_owned() }
        }
    );
    assert_eq!(transport.creates.load(Ordering::SeqCst), 1);
    assert_eq!(transport.updates.load(Ordering::SeqCst), 0);

    let payloads = transport.payloads.lock().unwrap();
    assert_eq!(payloads[0].text("deliveryPrice"), Some("500"));
    assert_eq!(payloads[0].text("menuItems[0][price]"), Some("850"));
    assert_eq!(payloads[0].text("cuisines[0]"), Some("Mexican"));
    assert_eq!(*notifier.successes.lock().unwrap(), vec!["Restaurant created".to_owned()]);
    assert_eq!(orch.status(), SubmitStatus::Idle);
}

#[tokio::test]
async fn edit_mode_uses_update() {
    let transport = Arc::new(MockTransport::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let orch = orchestrator(&transport, &notifier);

    let mut form = RestaurantForm::edit(CuisineCatalog::default(), &existing_restaurant());
    let outcome = orch.submit(&mut form).await;

    assert!(matches!(outcome, SubmitOutcome::Sent { mode: SubmitMode::Update, .. }));
    assert_eq!(transport.updates.load(Ordering::SeqCst), 1);
    let payloads = transport.payloads.lock().unwrap();
    assert_eq!(payloads[0].text("deliveryPrice"), Some("1050"));
    assert_eq!(payloads[0].text("menuItems[0][price]"), Some("1299"));
}

// =========================================================================
// Failure
// =========================================================================

#[tokio::test]
async fn transport_failure_notifies_and_preserves_draft() {
    let transport = Arc::new(MockTransport::failing(TransportError::Status {
        status: 500,
        message: "Something went wrong".to_owned(),
    }));
    let notifier = Arc::new(RecordingNotifier::default());
    let orch = orchestrator(&transport, &notifier);

    let mut form = filled_form();
    form.set_image_file(Some(crate::form::types::ImageFile::new("logo.png", vec![1])));
    let before = form.draft().clone();

    let outcome = orch.submit(&mut form).await;

    assert!(matches!(outcome, SubmitOutcome::Failed { mode: SubmitMode::Create, .. }));
    assert_eq!(*notifier.errors.lock().unwrap(), vec!["Something went wrong".to_owned()]);
    assert_eq!(form.draft(), &before);
    assert_eq!(orch.status(), SubmitStatus::Idle);

    // Retry without re-entering anything.
    let retry = orch.submit(&mut form).await;
    assert!(matches!(retry, SubmitOutcome::Failed { .. }));
    assert_eq!(transport.calls(), 2);
}

// =========================================================================
// Single in-flight submission
// =========================================================================

#[tokio::test]
async fn second_submit_while_in_flight_is_a_no_op() {
    let transport = Arc::new(MockTransport::holding());
    let notifier = Arc::new(RecordingNotifier::default());
    let orch = orchestrator(&transport, &notifier);

    let mut first = filled_form();
    let mut second = filled_form();

    let (a, b, ()) = tokio::join!(orch.submit(&mut first), orch.submit(&mut second), async {
        assert_eq!(orch.status(), SubmitStatus::Submitting);
        assert!(orch.controls_disabled());
        assert_eq!(orch.submit_label(&filled_form()), SUBMITTING_LABEL);
        if let Some(hold) = &transport.hold {
            hold.notify_one();
        }
    });

    assert!(matches!(a, SubmitOutcome::Sent { .. }));
    assert_eq!(b, SubmitOutcome::Rejected);
    assert_eq!(transport.calls(), 1);
    assert_eq!(orch.status(), SubmitStatus::Idle);
}
