use crate::models::DoctorRecord;

/// Built-in roster written out on first run.
pub fn seed_roster() -> Vec<DoctorRecord> {
    vec![
        DoctorRecord::new("Dr. Sarah Johnson", "Cardiology", "New York", "15 years", "4.8", "sarah.johnson@hospital.com"),
        DoctorRecord::new("Dr. Michael Chen", "Neurology", "Los Angeles", "12 years", "4.7", "michael.chen@hospital.com"),
        DoctorRecord::new("Dr. Emily Rodriguez", "Pulmonology", "Chicago", "10 years", "4.6", "emily.rodriguez@hospital.com"),
        DoctorRecord::new("Dr. James Wilson", "Gastroenterology", "Houston", "8 years", "4.5", "james.wilson@hospital.com"),
        DoctorRecord::new("Dr. Lisa Thompson", "Dermatology", "Phoenix", "6 years", "4.4", "lisa.thompson@hospital.com"),
        DoctorRecord::new("Dr. Robert Brown", "Orthopedics", "Philadelphia", "20 years", "4.9", "robert.brown@hospital.com"),
        DoctorRecord::new("Dr. Amanda Davis", "General Practice", "San Antonio", "5 years", "4.3", "amanda.davis@hospital.com"),
        DoctorRecord::new("Dr. David Martinez", "Psychiatry", "San Diego", "14 years", "4.7", "david.martinez@hospital.com"),
    ]
}
