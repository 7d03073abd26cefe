//! Prompt templates for the three documentation stages.
//!
//! The prompts pin down the reply shape: the SOAP stage asks for a
//! machine-parseable JSON object, the summary stage bans clinical
//! jargon, and the prescription stage names an exact sentinel for the
//! no-prescription case so the reply can be mapped to `None`.

/// Exact reply the prescription prompt requests when the note contains
/// no medications.
pub const NO_PRESCRIPTION_SENTINEL: &str = "No prescriptions recommended";

/// Prompt asking for a structured SOAP note as JSON.
pub fn soap_note(rough_notes: &str) -> String {
    format!(
        "You are a medical documentation expert. Convert the following rough clinical notes \
         into a structured SOAP note.\n\
         Return the response as valid JSON with exactly these fields:\n\
         {{\n\
             \"subjective\": \"Patient's chief complaint and history\",\n\
             \"objective\": \"Vital signs and examination findings\",\n\
             \"assessment\": \"Clinical diagnosis and assessment\",\n\
             \"plan\": \"Treatment plan and recommendations\"\n\
         }}\n\n\
         Rough notes:\n{rough_notes}\n\n\
         Return ONLY valid JSON, no additional text."
    )
}

/// Prompt asking for a plain-language patient summary.
pub fn patient_summary(soap_note: &str) -> String {
    format!(
        "You are a medical translator. Convert the following medical SOAP note into a simple, \
         patient-friendly summary.\n\
         Use simple 5th-grade level English that a patient can understand.\n\
         Avoid medical jargon. Explain in simple terms what the doctor found and what the \
         patient should do next.\n\
         Keep it to 2-3 paragraphs maximum.\n\n\
         SOAP Note:\n{soap_note}\n\n\
         Patient Summary:"
    )
}

/// Prompt asking for the prescription list, or the sentinel when there
/// is none.
pub fn prescription(soap_note: &str) -> String {
    format!(
        "Extract any prescription medications from the following medical note.\n\
         Format as a simple list with medication name, dosage, and frequency.\n\
         If no medications are mentioned, return \"{NO_PRESCRIPTION_SENTINEL}\".\n\n\
         Medical Note:\n{soap_note}\n\n\
         Prescription List:"
    )
}
