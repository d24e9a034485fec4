use chrono::{Duration, NaiveDate};

use super::{
    Candidate, CandidateId, Department, EntityCatalog, Job, JobId, JobStatus, Location, Stage,
    User,
};

const USERS: [(u32, &str, &str, &str); 4] = [
    (1, "Alex Johnson", "alex.johnson@example.com", "HR Manager"),
    (2, "Jamie Smith", "jamie.smith@example.com", "Recruiter"),
    (3, "Taylor Wilson", "taylor.wilson@example.com", "Hiring Manager"),
    (4, "Morgan Lee", "morgan.lee@example.com", "Interview Panel"),
];

const DEPARTMENTS: [&str; 8] = [
    "Engineering",
    "Marketing",
    "Finance",
    "Sales",
    "Product",
    "Design",
    "Customer Support",
    "Human Resources",
];

const LOCATIONS: [&str; 6] = [
    "San Francisco, CA",
    "New York, NY",
    "Austin, TX",
    "Remote",
    "Chicago, IL",
    "London, UK",
];

const JOB_STATUSES: [(&str, &str); 4] = [
    ("Open", "bg-green-500"),
    ("Paused", "bg-yellow-500"),
    ("Closed", "bg-red-500"),
    ("Draft", "bg-gray-400"),
];

const STAGES: [(&str, &str); 7] = [
    ("New", "bg-blue-500"),
    ("Screening", "bg-purple-500"),
    ("Interview", "bg-indigo-500"),
    ("Assessment", "bg-teal-500"),
    ("Offer", "bg-pink-500"),
    ("Hired", "bg-green-500"),
    ("Rejected", "bg-red-500"),
];

struct JobSeed {
    title: &'static str,
    department: usize,
    location: usize,
    status: usize,
    posted_days_ago: i64,
    applications: u32,
}

const JOBS: [JobSeed; 8] = [
    JobSeed {
        title: "Senior Frontend Developer",
        department: 0,
        location: 0,
        status: 0,
        posted_days_ago: 5,
        applications: 18,
    },
    JobSeed {
        title: "Marketing Manager",
        department: 1,
        location: 1,
        status: 0,
        posted_days_ago: 8,
        applications: 12,
    },
    JobSeed {
        title: "Financial Analyst",
        department: 2,
        location: 2,
        status: 0,
        posted_days_ago: 12,
        applications: 9,
    },
    JobSeed {
        title: "Sales Representative",
        department: 3,
        location: 4,
        status: 0,
        posted_days_ago: 15,
        applications: 24,
    },
    JobSeed {
        title: "Product Manager",
        department: 4,
        location: 3,
        status: 0,
        posted_days_ago: 18,
        applications: 15,
    },
    JobSeed {
        title: "UX/UI Designer",
        department: 5,
        location: 0,
        status: 0,
        posted_days_ago: 20,
        applications: 11,
    },
    JobSeed {
        title: "Customer Support Specialist",
        department: 6,
        location: 3,
        status: 1,
        posted_days_ago: 25,
        applications: 19,
    },
    JobSeed {
        title: "HR Coordinator",
        department: 7,
        location: 1,
        status: 2,
        posted_days_ago: 30,
        applications: 8,
    },
];

struct CandidateSeed {
    name: &'static str,
    phone: &'static str,
    location: &'static str,
    job: u32,
    applied_days_ago: i64,
    stage: usize,
    tags: &'static [&'static str],
}

const CANDIDATES: [CandidateSeed; 9] = [
    CandidateSeed {
        name: "Emma Thompson",
        phone: "(555) 123-4567",
        location: "San Francisco, CA",
        job: 1,
        applied_days_ago: 2,
        stage: 2,
        tags: &["React", "Senior", "FastTrack"],
    },
    CandidateSeed {
        name: "David Chen",
        phone: "(555) 234-5678",
        location: "New York, NY",
        job: 1,
        applied_days_ago: 4,
        stage: 1,
        tags: &["React", "Junior"],
    },
    CandidateSeed {
        name: "Sophia Martinez",
        phone: "(555) 345-6789",
        location: "Austin, TX",
        job: 2,
        applied_days_ago: 3,
        stage: 4,
        tags: &["Marketing", "Senior", "FastTrack"],
    },
    CandidateSeed {
        name: "James Wilson",
        phone: "(555) 456-7890",
        location: "Chicago, IL",
        job: 3,
        applied_days_ago: 5,
        stage: 3,
        tags: &["Finance", "Mid-level"],
    },
    CandidateSeed {
        name: "Olivia Davis",
        phone: "(555) 567-8901",
        location: "Remote",
        job: 4,
        applied_days_ago: 6,
        stage: 0,
        tags: &["Sales", "B2B"],
    },
    CandidateSeed {
        name: "Michael Brown",
        phone: "(555) 678-9012",
        location: "San Francisco, CA",
        job: 5,
        applied_days_ago: 7,
        stage: 2,
        tags: &["Product", "Senior", "FastTrack"],
    },
    CandidateSeed {
        name: "Emily Johnson",
        phone: "(555) 789-0123",
        location: "Remote",
        job: 6,
        applied_days_ago: 8,
        stage: 5,
        tags: &["Design", "UX", "UI", "Figma"],
    },
    CandidateSeed {
        name: "Daniel Kim",
        phone: "(555) 890-1234",
        location: "New York, NY",
        job: 7,
        applied_days_ago: 9,
        stage: 6,
        tags: &["Support", "SaaS"],
    },
    CandidateSeed {
        name: "Sarah Taylor",
        phone: "(555) 901-2345",
        location: "Chicago, IL",
        job: 8,
        applied_days_ago: 10,
        stage: 1,
        tags: &["HR", "Coordinator"],
    },
];

fn email_for(name: &str) -> String {
    let local = name
        .split_whitespace()
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join(".");
    format!("{local}@example.com")
}

fn distinct_tags(tags: &[&str]) -> Vec<String> {
    let mut distinct: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        if !distinct.iter().any(|existing| existing == tag) {
            distinct.push(tag.to_string());
        }
    }
    distinct
}

pub(super) fn build(today: NaiveDate) -> EntityCatalog {
    let users = USERS
        .iter()
        .map(|(id, name, email, role)| User {
            id: *id,
            name: name.to_string(),
            email: email.to_string(),
            role: role.to_string(),
        })
        .collect();

    let departments: Vec<Department> = (1u32..)
        .zip(DEPARTMENTS)
        .map(|(id, name)| Department {
            id,
            name: name.to_string(),
        })
        .collect();

    let locations: Vec<Location> = (1u32..)
        .zip(LOCATIONS)
        .map(|(id, name)| Location {
            id,
            name: name.to_string(),
        })
        .collect();

    let job_statuses: Vec<JobStatus> = (1u32..)
        .zip(JOB_STATUSES)
        .map(|(id, (name, color))| JobStatus {
            id,
            name: name.to_string(),
            color: color.to_string(),
        })
        .collect();

    let stages: Vec<Stage> = (1u32..)
        .zip(STAGES)
        .map(|(id, (name, color))| Stage::new(id, name, color))
        .collect();

    let jobs = (1u32..)
        .zip(JOBS.iter())
        .map(|(id, seed)| Job {
            id: JobId(id),
            title: seed.title.to_string(),
            department: departments[seed.department].clone(),
            location: locations[seed.location].clone(),
            status: job_statuses[seed.status].clone(),
            posted_date: today - Duration::days(seed.posted_days_ago),
            applications: seed.applications,
        })
        .collect();

    let candidates = (1u32..)
        .zip(CANDIDATES.iter())
        .map(|(id, seed)| Candidate {
            id: CandidateId(id),
            name: seed.name.to_string(),
            email: email_for(seed.name),
            phone: seed.phone.to_string(),
            location: seed.location.to_string(),
            job_id: JobId(seed.job),
            applied_date: today - Duration::days(seed.applied_days_ago),
            status: stages[seed.stage].clone(),
            tags: distinct_tags(seed.tags),
        })
        .collect();

    EntityCatalog {
        users,
        departments,
        locations,
        job_statuses,
        stages,
        jobs,
        candidates,
        activities: super::activity::seed(today),
        conversations: super::conversation::seed(today),
    }
}
