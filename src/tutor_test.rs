use futures::executor::block_on;

use super::*;
use crate::annotation::AnnotationKind;
use crate::sim::SimKind;

struct BrokenTutor;

#[async_trait(?Send)]
impl Tutor for BrokenTutor {
    async fn ask(&self, _question: &str, _snapshot: &Snapshot) -> Result<TutorReply, TutorError> {
        Err(TutorError::Unavailable("offline".into()))
    }
}

fn projectile_snapshot() -> Snapshot {
    SimKind::Projectile.build().snapshot()
}

// =============================================================
// Script
// =============================================================

#[test]
fn parabola_question_gets_force_arrows_at_projectile() {
    let snap = projectile_snapshot();
    let reply = ScriptedTutor::script("Why is the path a parabola?", &snap);
    assert!(reply.explanation.starts_with("Gravity acts downwards"));
    assert_eq!(reply.annotations.len(), 2);

    let gravity = &reply.annotations[0];
    assert_eq!(gravity.kind, AnnotationKind::Arrow);
    assert_eq!(gravity.anchor(), Vector2::ZERO);
    assert_eq!(gravity.tip(), Vector2::new(0.0, -5.0));
    assert_eq!(gravity.text.as_deref(), Some("Gravity (-g)"));
    assert_eq!(gravity.color(), "#ef4444");

    let velocity = &reply.annotations[1];
    assert_eq!(velocity.tip(), Vector2::new(5.0, 0.0));
    assert_eq!(velocity.text.as_deref(), Some("Velocity (vx)"));
    assert_eq!(velocity.color(), "#22c55e");
}

#[test]
fn keyword_match_ignores_case() {
    let reply = ScriptedTutor::script("What makes the CURVE?", &projectile_snapshot());
    assert_eq!(reply.annotations.len(), 2);
}

#[test]
fn arrows_fall_back_to_fixed_anchor_without_projectile() {
    let snap = SimKind::ChargedParticle.build().snapshot();
    let reply = ScriptedTutor::script("curve?", &snap);
    assert!(reply.annotations.iter().all(|a| a.anchor() == Vector2::new(10.0, 10.0)));
}

#[test]
fn other_questions_get_generic_prompt() {
    let reply = ScriptedTutor::script("What is energy?", &projectile_snapshot());
    assert!(reply.explanation.starts_with("I can help explain the physics!"));
    assert!(reply.annotations.is_empty());
}

#[test]
fn reply_serializes_camel_case() {
    let reply = ScriptedTutor::script("parabola", &projectile_snapshot());
    let value = serde_json::to_value(&reply).unwrap();
    assert_eq!(value["annotations"][0]["type"], "arrow");
    assert!(value["explanation"].is_string());
}

// =============================================================
// Consult
// =============================================================

#[test]
fn consult_answers_with_zero_latency() {
    let tutor = ScriptedTutor::new(0);
    let mut inquiries = Inquiries::default();
    let (id, reg) = inquiries.open();
    let snap = projectile_snapshot();
    let outcome = block_on(consult(&tutor, "parabola", &snap, reg));
    assert!(matches!(outcome, Consultation::Answered(ref r) if r.annotations.len() == 2));
    assert!(inquiries.close(id));
    assert!(inquiries.is_empty());
}

#[test]
fn tutor_failure_becomes_fallback() {
    let mut inquiries = Inquiries::default();
    let (_, reg) = inquiries.open();
    let outcome = block_on(consult(&BrokenTutor, "anything", &projectile_snapshot(), reg));
    assert_eq!(outcome, Consultation::Fallback(TutorReply::fallback()));
    let Consultation::Fallback(reply) = outcome else {
        panic!("expected fallback");
    };
    assert_eq!(reply.explanation, FALLBACK_MESSAGE);
}

#[test]
fn cancelled_request_yields_nothing() {
    let tutor = ScriptedTutor::new(0);
    let mut inquiries = Inquiries::default();
    let (_, reg) = inquiries.open();
    assert_eq!(inquiries.cancel_all(), 1);
    let outcome = block_on(consult(&tutor, "parabola", &projectile_snapshot(), reg));
    assert_eq!(outcome, Consultation::Cancelled);
}

#[test]
fn cancel_targets_one_request() {
    let tutor = ScriptedTutor::new(0);
    let mut inquiries = Inquiries::default();
    let (first, first_reg) = inquiries.open();
    let (_, second_reg) = inquiries.open();
    assert!(inquiries.cancel(first));
    assert!(!inquiries.cancel(first));
    assert_eq!(inquiries.len(), 1);

    let snap = projectile_snapshot();
    assert_eq!(block_on(consult(&tutor, "x", &snap, first_reg)), Consultation::Cancelled);
    assert!(matches!(block_on(consult(&tutor, "x", &snap, second_reg)), Consultation::Answered(_)));
}

#[test]
fn closing_unknown_id_is_false() {
    let mut inquiries = Inquiries::default();
    assert!(!inquiries.close(Uuid::new_v4()));
}

#[test]
fn error_codes() {
    assert_eq!(TutorError::Unavailable(String::new()).error_code(), "E_TUTOR_UNAVAILABLE");
    assert_eq!(TutorError::Cancelled.error_code(), "E_TUTOR_CANCELLED");
}
