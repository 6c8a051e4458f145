pub mod course;
pub mod enrollment;
pub mod testimonial;
pub mod workshop;

pub use course::{Course, CourseDetail};
pub use enrollment::{Enrollment, EnrollmentResponse, NewEnrollmentRequest};
pub use testimonial::Testimonial;
pub use workshop::Workshop;
