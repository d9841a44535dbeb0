//! Per-session contact sets.
//!
//! Every viewer gets the assistant. Employees see their care team, clinical
//! staff see their colleagues and one contact per roster patient, and
//! administrators see staff only.

use crate::models::{Contact, PatientRecord, Priority, Role, ASSISTANT_ID};

/// Role label of patient contacts
pub const PATIENT_ROLE: &str = "Paciente";
/// Role label of the assistant contact
pub const ASSISTANT_ROLE: &str = "Assistente IA";

/// Decides the priority of a patient contact
pub trait TriagePolicy {
    /// Priority for `patient`
    fn priority_for(&self, patient: &PatientRecord) -> Priority;
}

/// Uses the registry's priority, or a fixed fallback when it has none
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordTriage {
    /// Priority for records without one
    pub fallback: Priority,
}

impl TriagePolicy for RecordTriage {
    fn priority_for(&self, patient: &PatientRecord) -> Priority {
        patient.priority.unwrap_or(self.fallback)
    }
}

/// The automated assistant contact
#[must_use]
pub fn assistant_contact(display_name: &str) -> Contact {
    let mut contact = Contact::new(ASSISTANT_ID, display_name, ASSISTANT_ROLE);
    contact.online = true;
    contact.specialty = Some("Apoio emocional 24h".to_string());
    contact
}

fn staff(id: &str, name: &str, role: &str, specialty: &str, online: bool, last_seen: Option<&str>) -> Contact {
    let mut contact = Contact::new(id, name, role);
    contact.specialty = Some(specialty.to_string());
    contact.online = online;
    contact.last_seen = last_seen.map(ToString::to_string);
    contact
}

/// Care team shown to employees
#[must_use]
pub fn care_team() -> Vec<Contact> {
    vec![
        staff("psi-ana", "Dra. Ana Souza", "Psicólogo", "Terapia Cognitivo-Comportamental", true, None),
        staff("med-carlos", "Dr. Carlos Mendes", "Médico", "Psiquiatria", false, Some("há 2 horas")),
        staff("sup-equipe", "Equipe de Acolhimento", "Suporte", "Orientação e agendamentos", true, None),
    ]
}

/// Colleagues shown to clinical staff and administrators
#[must_use]
pub fn clinical_staff() -> Vec<Contact> {
    vec![
        staff("psi-ana", "Dra. Ana Souza", "Psicólogo", "Terapia Cognitivo-Comportamental", true, None),
        staff("psi-marina", "Dra. Marina Lopes", "Psicólogo", "Psicologia Organizacional", false, Some("ontem")),
        staff("med-carlos", "Dr. Carlos Mendes", "Médico", "Psiquiatria", false, Some("há 2 horas")),
        staff("med-helena", "Dra. Helena Rocha", "Médico", "Medicina do Trabalho", true, None),
        staff("adm-coord", "Coordenação do Programa", "Administrador", "Gestão", true, None),
    ]
}

/// Contact for one roster patient
#[must_use]
pub fn patient_contact(patient: &PatientRecord, triage: &dyn TriagePolicy) -> Contact {
    let mut contact = Contact::new(&format!("patient-{}", patient.id), &patient.name, PATIENT_ROLE);
    contact.is_patient = true;
    contact.patient_id = Some(patient.id.clone());
    contact.priority = triage.priority_for(patient);
    contact
}

/// Contacts for a session, assistant first.
#[must_use]
pub fn contacts_for_role(
    role: Role,
    roster: &[PatientRecord],
    triage: &dyn TriagePolicy,
    assistant_name: &str,
) -> Vec<Contact> {
    let mut contacts = vec![assistant_contact(assistant_name)];
    if role == Role::Servidor {
        contacts.extend(care_team());
        return contacts;
    }

    contacts.extend(clinical_staff());
    if role.is_clinical() {
        contacts.extend(roster.iter().map(|p| patient_contact(p, triage)));
    }
    contacts
}

/// Small roster used by the CLI when none is supplied
#[must_use]
pub fn demo_roster() -> Vec<PatientRecord> {
    [
        ("1001", "João Pereira", Some(Priority::High)),
        ("1002", "Maria Oliveira", None),
        ("1003", "Pedro Santos", Some(Priority::Urgent)),
        ("1004", "Luciana Costa", Some(Priority::Low)),
    ]
    .into_iter()
    .map(|(id, name, priority)| PatientRecord {
        id: id.to_string(),
        name: name.to_string(),
        avatar: None,
        priority,
    })
    .collect()
}
