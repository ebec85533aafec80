use crate::domain::model::TripRequest;

pub fn build_prompt(request: &TripRequest) -> String {
    format!(
        "You are a kind and helpful travel assistant.\n\
         \n\
         Generate a {days}-day travel itinerary for {location} in {month}.\n\
         \n\
         Include morning, afternoon, and evening sightseeing activity suggestions with food options.\n\
         \n\
         Ensure popular and offbeat spots are covered with specific timings.  \
         Be specific about times, e.g., \"9:00 AM: Visit the Eiffel Tower...\"\n",
        days = request.days(),
        location = request.location(),
        month = request.month().name(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Month;

    #[test]
    fn test_prompt_contains_trip_fields() {
        let request = TripRequest::new("Ho Chi Minh", 4, Month::December).unwrap();
        let prompt = build_prompt(&request);

        assert!(prompt.contains("Generate a 4-day travel itinerary for Ho Chi Minh in December."));
        assert!(prompt.starts_with("You are a kind and helpful travel assistant."));
    }

    #[test]
    fn test_prompt_keeps_timing_instructions() {
        let request = TripRequest::new("Kyoto", 1, Month::April).unwrap();
        let prompt = build_prompt(&request);

        assert!(prompt.contains("morning, afternoon, and evening"));
        assert!(prompt.contains("\"9:00 AM: Visit the Eiffel Tower...\""));
        assert!(!prompt.contains("    "));
    }
}
