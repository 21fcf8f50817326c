//! LLM prompts for itinerary generation.

/// Collection of prompts used to ask for points of interest.
pub struct Prompts;

impl Prompts {
    /// System instruction describing the required output shape.
    pub fn itinerary_system() -> &'static str {
        r#"You are tasked to create a list of points of interest according to the user's instructions.
As a title, use the last known official name of the place or building. It will be used to find this place with a places lookup service. If a place doesn't have a well-known name, add an address (street name and street number if available) to the title.
If "type of points of interest" instructions are unclear, make a list of most popular attractions in this area.
In your answer, do not include any text and only provide the location list in the following format:
[{"general_location": "<city or general area and country>", "title": "<building name or address>", "info": "<information about the building>"}, {"general_location": "<city or general area and country>", "title": "<building name or address>", "info": "<information about the building>"}]"#
    }

    /// User message template for a trip request.
    pub fn itinerary_request() -> &'static str {
        "Location: {location}\nNumber of points of interest: {count}\nType of points of interest: {interest}"
    }
}
