//! Prompt templates
//!
//! Every template is a fixed outline with the caller's fragments
//! interpolated at fixed positions. Numbered sections are written as
//! `(1)`, `(2)`, ... so downstream checks can count them.

// Questions

pub(crate) fn person(subject: &str) -> String {
    format!(
        "Please provide comprehensive information about {subject}, including their background, \
         notable achievements, current role or status, and significance in their field. \
         Structure the response with: (1) a brief introduction, (2) key biographical details, \
         (3) major accomplishments or contributions, and (4) their current relevance or impact."
    )
}

pub(crate) fn definition(subject: &str) -> String {
    format!(
        "Please provide a comprehensive explanation of {subject}, including: (1) a clear \
         definition, (2) key characteristics or components, (3) practical applications or \
         examples, (4) historical context or development, and (5) current relevance or \
         importance in today's context."
    )
}

pub(crate) fn step_guide(task: &str) -> String {
    format!(
        "Please provide a detailed, step-by-step guide on how to {task}. Include: (1) necessary \
         prerequisites or requirements, (2) clear sequential steps with specific instructions, \
         (3) common challenges and how to overcome them, (4) best practices and tips for \
         success, and (5) expected outcomes and how to measure success."
    )
}

pub(crate) fn causes(phenomenon: &str) -> String {
    format!(
        "Please provide a comprehensive analysis of why {phenomenon}. Structure your response to \
         include: (1) primary causes and contributing factors, (2) underlying mechanisms or \
         processes, (3) historical context and development, (4) supporting evidence and \
         examples, and (5) implications and broader significance."
    )
}

pub(crate) fn comparison_question() -> String {
    "Please provide a detailed comparison that includes: (1) clear definitions of each item \
     being compared, (2) key similarities and differences, (3) specific examples illustrating \
     these distinctions, (4) practical implications of these differences, and (5) guidance on \
     when to use or choose one over the other."
        .to_string()
}

pub(crate) fn location(place: &str) -> String {
    format!(
        "Please provide detailed information about the location of {place}, including: (1) \
         precise geographical location with coordinates if relevant, (2) regional context and \
         nearby landmarks, (3) accessibility and transportation options, (4) historical or \
         cultural significance, and (5) current status or notable features."
    )
}

pub(crate) fn timing(event: &str) -> String {
    format!(
        "Please provide comprehensive temporal information about {event}, including: (1) \
         specific dates, times, or time periods, (2) historical context and background, (3) \
         sequence of related events, (4) duration and timeline, and (5) significance of the \
         timing and any recurring patterns."
    )
}

pub(crate) fn generic_question(text: &str) -> String {
    format!(
        "Please provide a comprehensive and well-structured response to: \"{text}\" Include \
         relevant background information, specific details, practical examples, and ensure the \
         response addresses all aspects of the question with clarity and depth."
    )
}

// Requests

pub(crate) fn creation(subject: &str) -> String {
    format!(
        "Please create {subject} with the following comprehensive approach: (1) Define clear \
         objectives and requirements, (2) Outline the structure and key components, (3) Provide \
         detailed content with specific examples, (4) Include best practices and quality \
         standards, (5) Suggest methods for testing or validation, and (6) Offer recommendations \
         for improvement or iteration."
    )
}

pub(crate) fn explanation(subject: &str) -> String {
    format!(
        "Please provide a comprehensive explanation of {subject} that includes: (1) a clear \
         overview and definition, (2) key concepts and principles, (3) practical applications and \
         real-world examples, (4) step-by-step processes where applicable, (5) common \
         misconceptions or challenges, and (6) current trends or future implications."
    )
}

pub(crate) fn analysis(subject: &str) -> String {
    format!(
        "Please conduct a thorough analysis of {subject} that covers: (1) background context and \
         current situation, (2) key factors and variables involved, (3) strengths, weaknesses, \
         opportunities, and threats, (4) data-driven insights with supporting evidence, (5) \
         comparative analysis with alternatives, and (6) actionable conclusions and \
         recommendations."
    )
}

pub(crate) fn comparison_request() -> String {
    "Please provide a detailed comparison that includes: (1) clear definitions and background \
     of each item, (2) systematic comparison across key dimensions, (3) advantages and \
     disadvantages of each option, (4) specific use cases and scenarios, (5) quantitative data \
     where available, and (6) recommendations based on different needs or contexts."
        .to_string()
}

pub(crate) fn guidance(task: &str) -> String {
    format!(
        "Please provide comprehensive guidance on {task} that includes: (1) clear step-by-step \
         instructions, (2) necessary prerequisites and preparation, (3) detailed explanations for \
         each step, (4) common pitfalls and how to avoid them, (5) troubleshooting tips for \
         potential issues, and (6) resources for further learning or support."
    )
}

pub(crate) fn generic_request(text: &str) -> String {
    format!(
        "Please provide a comprehensive response to the request: \"{text}\" Ensure the response \
         includes: (1) clear structure and organization, (2) specific details and concrete \
         examples, (3) practical applications and actionable insights, (4) relevant context and \
         background information, and (5) thorough coverage of all aspects mentioned."
    )
}

// Statements

pub(crate) fn vague_topic(topic: &str) -> String {
    format!(
        "Please provide a detailed and comprehensive response about {topic}. Structure your \
         response to include: (1) clear definitions and background context, (2) key concepts and \
         important details, (3) practical examples and real-world applications, (4) current \
         relevance and significance, and (5) actionable insights or takeaways for the reader."
    )
}

pub(crate) fn statement(text: &str) -> String {
    format!(
        "Please provide a comprehensive analysis and discussion of: \"{text}\" Include relevant \
         background information, multiple perspectives, supporting evidence, practical \
         implications, and actionable insights. Structure the response clearly with specific \
         examples and detailed explanations."
    )
}

pub(crate) fn structured(text: &str) -> String {
    format!(
        "Please provide a well-structured and comprehensive response to: \"{text}\" Ensure the \
         response includes: (1) clear organization and logical flow, (2) specific details and \
         concrete examples, (3) relevant context and background, (4) practical applications and \
         implications, and (5) thorough coverage that addresses all aspects of the topic."
    )
}

// Modes

pub(crate) fn detail(text: &str) -> String {
    format!(
        "Please provide an in-depth, detailed analysis of: {text}\n\n\
         Include the following in your response:\n\
         • Comprehensive background and context\n\
         • Step-by-step breakdown of key components\n\
         • Specific examples and case studies\n\
         • Practical applications and implications\n\
         • Potential challenges and solutions\n\
         • Relevant data, statistics, or research findings\n\
         • Actionable recommendations and next steps"
    )
}

pub(crate) fn professional(text: &str, topic: &str) -> String {
    format!(
        "Professional Analysis Request: {text}\n\n\
         Please provide a structured, professional response that includes:\n\n\
         1. Executive Summary\n\
         2. Detailed Analysis of {topic}\n\
         3. Key Findings and Insights\n\
         4. Supporting Evidence and Data\n\
         5. Risk Assessment and Considerations\n\
         6. Strategic Recommendations\n\
         7. Implementation Guidelines\n\
         8. Success Metrics and KPIs\n\n\
         Ensure all recommendations are evidence-based and include specific, actionable steps."
    )
}

pub(crate) fn creative(text: &str, topic: &str) -> String {
    format!(
        "Creative Exploration: {text}\n\n\
         Please approach {topic} with innovative thinking and provide:\n\n\
         • Multiple unique perspectives and angles\n\
         • Creative analogies and metaphors\n\
         • Unconventional connections and insights\n\
         • Imaginative examples and scenarios\n\
         • Fresh approaches that challenge conventional thinking\n\
         • Inspiring and thought-provoking ideas\n\
         • Practical creativity that balances innovation with feasibility\n\n\
         Think outside the box while maintaining relevance and value."
    )
}
