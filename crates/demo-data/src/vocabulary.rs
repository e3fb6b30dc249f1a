//! Fixed vocabularies the generators draw from.

pub(crate) const DEPARTMENTS: &[&str; 8] = &[
    "Cardiology",
    "Neurology",
    "Orthopedics",
    "Pediatrics",
    "Dermatology",
    "General Medicine",
    "Oncology",
    "Radiology",
];

pub(crate) const SPECIALIZATIONS: &[&str; 8] = &[
    "Cardiologist",
    "Neurologist",
    "Orthopedic Surgeon",
    "Pediatrician",
    "Dermatologist",
    "General Physician",
    "Oncologist",
    "Radiologist",
];

pub(crate) const VISIT_REASONS: &[&str; 9] = &[
    "Routine check-up",
    "Follow-up consultation",
    "Chest pain",
    "Persistent headache",
    "Joint pain",
    "Skin rash",
    "Fever and cough",
    "Blood pressure review",
    "Post-operative review",
];

pub(crate) const CONDITIONS: &[&str; 8] = &[
    "Hypertension",
    "Type 2 diabetes",
    "Asthma",
    "Migraine",
    "Osteoarthritis",
    "Eczema",
    "Hypothyroidism",
    "Seasonal allergies",
];

pub(crate) const GENDERS: &[&str; 2] = &["Female", "Male"];

pub(crate) const BLOOD_GROUPS: &[&str; 8] = &["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"];

pub(crate) const MEDICATIONS: &[(&str, &str); 8] = &[
    ("Amoxicillin", "500 mg"),
    ("Lisinopril", "10 mg"),
    ("Metformin", "850 mg"),
    ("Atorvastatin", "20 mg"),
    ("Omeprazole", "20 mg"),
    ("Salbutamol", "100 mcg"),
    ("Levothyroxine", "50 mcg"),
    ("Ibuprofen", "400 mg"),
];

pub(crate) const FREQUENCIES: &[&str; 5] = &[
    "Once daily",
    "Twice daily",
    "Three times daily",
    "Every 8 hours",
    "As needed",
];

/// Lab tests as `(name, unit, low, high)` with the reference range in tenths.
pub(crate) const LAB_TESTS: &[(&str, &str, u32, u32); 6] = &[
    ("Hemoglobin", "g/dL", 120, 175),
    ("Fasting glucose", "mg/dL", 700, 990),
    ("Total cholesterol", "mg/dL", 1250, 2000),
    ("TSH", "mIU/L", 4, 40),
    ("Creatinine", "mg/dL", 6, 13),
    ("White cell count", "10^9/L", 40, 110),
];

pub(crate) const TREATMENTS: &[&str; 6] = &[
    "Medication adjusted",
    "Lifestyle advice given",
    "Referred to specialist",
    "Physiotherapy prescribed",
    "Imaging ordered",
    "No change to treatment",
];

pub(crate) const BILLED_SERVICES: &[&str; 6] = &[
    "Consultation",
    "Blood panel",
    "X-ray imaging",
    "MRI scan",
    "Pharmacy",
    "Physiotherapy session",
];

pub(crate) const NOTIFICATIONS: &[(&str, &str); 6] = &[
    ("Appointment reminder", "You have an appointment tomorrow."),
    ("Lab results ready", "New lab results are available to view."),
    ("Prescription renewed", "Your prescription has been renewed."),
    ("Schedule change", "A consultation slot has been rescheduled."),
    ("Payment received", "Thank you, your payment was received."),
    ("New message", "You have a new message from the clinic."),
];

pub(crate) const ADMIN_ACTIONS: &[&str; 6] = &[
    "registered a new patient",
    "updated a doctor profile",
    "approved a leave request",
    "issued an invoice",
    "rescheduled an appointment",
    "added a department note",
];

pub(crate) const WEEKDAYS: &[&str; 5] = &["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];

pub(crate) const QUARTER_HOURS: &[u32; 4] = &[0, 15, 30, 45];
