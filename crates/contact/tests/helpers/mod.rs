#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use folio_contact::{
    ContactDialog, Delivery, DeliveryFailure, EmailDeliveryService, FormState, HostedConfig,
    TemplateParams,
};

pub const RECIPIENT: &str = "owner@folio.localhost";

pub enum Reply {
    Status(u16),
    Fail(DeliveryFailure),
    Hang,
}

/// Delivery double answering with a fixed reply and recording every call.
pub struct ScriptedDelivery {
    reply: Reply,
    calls: AtomicUsize,
    last: Mutex<Option<(String, String, TemplateParams, String)>>,
}

impl ScriptedDelivery {
    pub fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last(&self) -> Option<(String, String, TemplateParams, String)> {
        self.last.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailDeliveryService for ScriptedDelivery {
    async fn send(
        &self,
        service_id: &str,
        template_id: &str,
        params: &TemplateParams,
        public_key: &str,
    ) -> Result<u16, DeliveryFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some((
            service_id.to_owned(),
            template_id.to_owned(),
            params.clone(),
            public_key.to_owned(),
        ));

        match &self.reply {
            Reply::Status(status) => Ok(*status),
            Reply::Fail(failure) => Err(failure.clone()),
            Reply::Hang => std::future::pending().await,
        }
    }
}

pub fn hosted_config() -> HostedConfig {
    HostedConfig {
        service_id: "service_folio".to_owned(),
        template_id: "template_folio".to_owned(),
        public_key: "pk_folio".to_owned(),
    }
}

pub fn hosted_dialog(service: Arc<ScriptedDelivery>) -> ContactDialog {
    ContactDialog::new(Arc::new(Delivery::select(hosted_config(), RECIPIENT, service)))
}

pub fn mailto_dialog() -> ContactDialog {
    ContactDialog::new(Arc::new(Delivery::mailto(RECIPIENT)))
}

pub fn valid_form() -> FormState {
    FormState {
        name: "Ada Lovelace".to_owned(),
        email: "ada@example.com".to_owned(),
        subject: "Freelance project".to_owned(),
        message: "Hi, do you have time next month?".to_owned(),
    }
}

pub async fn fill(dialog: &ContactDialog, form: &FormState) {
    use folio_contact::Field;

    dialog.edit(Field::Name, form.name.clone()).await;
    dialog.edit(Field::Email, form.email.clone()).await;
    dialog.edit(Field::Subject, form.subject.clone()).await;
    dialog.edit(Field::Message, form.message.clone()).await;
}
